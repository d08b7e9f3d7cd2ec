//! Matchmaking suggestion request and response shapes.
//!
//! At most ten suggestions are persisted per (user, event); regeneration
//! replaces the full set and rows are never mutated in place.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Candidate display fields denormalized into a suggestion response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Candidate profile fields denormalized into a suggestion response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub interests: Vec<String>,
    pub goals: Vec<String>,
}

/// One entry of a suggestion list response.
///
/// `id` is the candidate's user id. Generation and fetch return the same
/// shape so callers can render either interchangeably.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionItem {
    pub id: Uuid,
    pub user: SuggestedUser,
    pub profile: SuggestedProfile,
    pub score: f64,
    pub reason: String,
}

/// Response body for suggestion generation and fetch.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<SuggestionItem>,
}

/// Request body for suggestion generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSuggestionsRequest {
    pub event_id: Uuid,
}
