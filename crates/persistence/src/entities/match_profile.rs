//! Matchmaking profile entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the match_profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct MatchProfileEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub interests: Vec<String>,
    pub goals: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MatchProfileEntity> for domain::models::MatchProfile {
    fn from(entity: MatchProfileEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            event_id: entity.event_id,
            headline: entity.headline,
            bio: entity.bio,
            interests: entity.interests,
            goals: entity.goals,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Candidate row for suggestion generation: a profile joined with its
/// owner's display fields.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateEntity {
    pub profile_id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub interests: Vec<String>,
    pub goals: Vec<String>,
    pub profile_created_at: DateTime<Utc>,
    pub profile_updated_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

impl CandidateEntity {
    /// The candidate's profile as a domain model, for scoring.
    pub fn to_profile(&self) -> domain::models::MatchProfile {
        domain::models::MatchProfile {
            id: self.profile_id,
            user_id: self.user_id,
            event_id: self.event_id,
            headline: self.headline.clone(),
            bio: self.bio.clone(),
            interests: self.interests.clone(),
            goals: self.goals.clone(),
            created_at: self.profile_created_at,
            updated_at: self.profile_updated_at,
        }
    }
}
