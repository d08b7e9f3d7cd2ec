//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application role carried by a user's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular event participant.
    Attendee,
    /// Check-in desk staff.
    Staff,
    /// Event organizer (full administrative access).
    Organizer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attendee => "attendee",
            Self::Staff => "staff",
            Self::Organizer => "organizer",
        }
    }

    /// Parses a role from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "attendee" => Some(Self::Attendee),
            "staff" => Some(Self::Staff),
            "organizer" => Some(Self::Organizer),
            _ => None,
        }
    }

    /// Whether this role may operate the check-in desk and manage
    /// registrations.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Staff | Self::Organizer)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User account record.
///
/// Account provisioning and login live in the external identity service;
/// this model only denormalizes display fields into API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [UserRole::Attendee, UserRole::Staff, UserRole::Organizer] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_parse_unknown() {
        assert_eq!(UserRole::parse("admin"), None);
        assert_eq!(UserRole::parse(""), None);
        assert_eq!(UserRole::parse("Staff"), None);
    }

    #[test]
    fn test_is_staff() {
        assert!(!UserRole::Attendee.is_staff());
        assert!(UserRole::Staff.is_staff());
        assert!(UserRole::Organizer.is_staff());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(UserRole::Organizer.to_string(), "organizer");
    }
}
