//! Matchmaking endpoint handlers.
//!
//! Generation scores the caller's profile against every other profile in
//! the event, persists the top suggestions atomically, and returns them.
//! Fetch returns the persisted set without rescoring.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_suggestions_generated;
use crate::middleware::UserAuth;
use domain::models::{
    GenerateSuggestionsRequest, MatchProfile, SuggestedProfile, SuggestedUser, SuggestionItem,
    SuggestionsResponse,
};
use domain::services::matchmaking::rank_candidates;
use persistence::entities::CandidateEntity;
use persistence::repositories::{
    EventRepository, MatchProfileRepository, MatchSuggestionRepository, RegistrationRepository,
};
use persistence::repositories::match_suggestion::NewSuggestion;

/// Query parameters for the suggestion fetch endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSuggestionsQuery {
    pub event_id: Uuid,
}

/// Generate and persist suggestions for the caller.
///
/// POST /api/v1/matchmaking/suggestions
pub async fn generate_suggestions(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Json(request): Json<GenerateSuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let event_id = request.event_id;

    let events = EventRepository::new(state.pool.clone());
    events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    let registrations = RegistrationRepository::new(state.pool.clone());
    registrations
        .find_by_user(event_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Validation("Not registered for this event".to_string()))?;

    let profiles = MatchProfileRepository::new(state.pool.clone());
    let requester: MatchProfile = profiles
        .find_by_user_event(auth.user_id, event_id)
        .await?
        .ok_or_else(|| {
            ApiError::Conflict("Complete your match profile before requesting suggestions".to_string())
        })?
        .into();

    if !requester.is_complete() {
        return Err(ApiError::Conflict(
            "Complete your match profile before requesting suggestions".to_string(),
        ));
    }

    let candidates = profiles.find_candidates(event_id, auth.user_id).await?;

    let candidate_profiles: Vec<MatchProfile> = candidates.iter().map(|c| c.to_profile()).collect();
    let ranked = rank_candidates(&requester, &candidate_profiles);

    let rows: Vec<NewSuggestion> = ranked
        .iter()
        .map(|s| NewSuggestion {
            suggested_user_id: s.user_id,
            score: s.score,
            reason: s.reason.clone(),
        })
        .collect();

    let suggestions = MatchSuggestionRepository::new(state.pool.clone());
    suggestions
        .replace_for_user(auth.user_id, event_id, &rows)
        .await?;

    let by_user: HashMap<Uuid, &CandidateEntity> =
        candidates.iter().map(|c| (c.user_id, c)).collect();

    let items: Vec<SuggestionItem> = ranked
        .into_iter()
        .filter_map(|s| {
            by_user.get(&s.user_id).map(|candidate| SuggestionItem {
                id: candidate.user_id,
                user: SuggestedUser {
                    id: candidate.user_id,
                    name: candidate.name.clone(),
                    email: candidate.email.clone(),
                    image: candidate.image.clone(),
                },
                profile: SuggestedProfile {
                    headline: candidate.headline.clone(),
                    bio: candidate.bio.clone(),
                    interests: candidate.interests.clone(),
                    goals: candidate.goals.clone(),
                },
                score: s.score,
                reason: s.reason,
            })
        })
        .collect();

    record_suggestions_generated(items.len());
    tracing::info!(
        user_id = %auth.user_id,
        event_id = %event_id,
        count = items.len(),
        "suggestions generated"
    );

    Ok(Json(SuggestionsResponse { suggestions: items }))
}

/// Fetch the caller's persisted suggestions.
///
/// GET /api/v1/matchmaking/suggestions?eventId=<id>
pub async fn get_suggestions(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Query(query): Query<GetSuggestionsQuery>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let repo = MatchSuggestionRepository::new(state.pool.clone());
    let rows = repo.find_for_user(auth.user_id, query.event_id).await?;

    let items = rows
        .into_iter()
        .map(|row| SuggestionItem {
            id: row.suggested_user_id,
            user: SuggestedUser {
                id: row.suggested_user_id,
                name: row.name,
                email: row.email,
                image: row.image,
            },
            profile: SuggestedProfile {
                headline: row.headline,
                bio: row.bio,
                interests: row.interests,
                goals: row.goals,
            },
            score: row.score,
            reason: row.reason,
        })
        .collect();

    Ok(Json(SuggestionsResponse { suggestions: items }))
}
