//! Matchmaking profile domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use shared::validation::validate_tag_list;

/// A participant's self-described interests and goals for one event.
///
/// Uniquely keyed by (user, event). Read-only input to the matchmaking
/// engine; edited by the owning user only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub interests: Vec<String>,
    pub goals: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MatchProfile {
    /// A profile with neither interests nor goals cannot be scored and
    /// blocks suggestion generation for its owner.
    pub fn is_complete(&self) -> bool {
        !self.interests.is_empty() || !self.goals.is_empty()
    }
}

/// Request body for creating or replacing the caller's profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertMatchProfileRequest {
    #[validate(length(max = 120, message = "Headline must be at most 120 characters"))]
    pub headline: Option<String>,

    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,

    #[validate(custom(function = "validate_tags"))]
    #[serde(default)]
    pub interests: Vec<String>,

    #[validate(custom(function = "validate_tags"))]
    #[serde(default)]
    pub goals: Vec<String>,
}

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    validate_tag_list(tags)
}
