//! Event domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An event that attendees register for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    /// URL-friendly identifier, unique across all events.
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Slug must be between 1 and 100 characters"))]
    pub slug: String,

    #[validate(length(max = 300, message = "Location must be at most 300 characters"))]
    pub location: Option<String>,

    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl CreateEventRequest {
    /// The schedule must be ordered; `Validate` cannot express a
    /// cross-field check so handlers call this after `validate()`.
    pub fn schedule_is_ordered(&self) -> bool {
        self.starts_at < self.ends_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request(name: &str, slug: &str) -> CreateEventRequest {
        let starts_at = Utc::now();
        CreateEventRequest {
            name: name.to_string(),
            slug: slug.to_string(),
            location: None,
            starts_at,
            ends_at: starts_at + Duration::hours(8),
        }
    }

    #[test]
    fn test_valid_request() {
        let req = request("Tech Summit 2025", "tech-summit-2025");
        assert!(req.validate().is_ok());
        assert!(req.schedule_is_ordered());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(request("", "slug").validate().is_err());
    }

    #[test]
    fn test_reversed_schedule_detected() {
        let mut req = request("Summit", "summit");
        req.ends_at = req.starts_at - Duration::hours(1);
        assert!(!req.schedule_is_ordered());
    }
}
