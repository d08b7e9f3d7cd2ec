//! Matchmaking suggestion entities (database row mappings).

use sqlx::FromRow;
use uuid::Uuid;

/// A persisted suggestion joined with the candidate's display fields and
/// profile, as returned by the fetch endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct SuggestionWithCandidateEntity {
    pub suggested_user_id: Uuid,
    pub score: f64,
    pub reason: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub interests: Vec<String>,
    pub goals: Vec<String>,
}
