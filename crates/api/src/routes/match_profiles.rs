//! Matchmaking profile endpoint handlers.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;
use domain::models::{MatchProfile, UpsertMatchProfileRequest};
use persistence::repositories::{EventRepository, MatchProfileRepository};

/// Create or replace the caller's matchmaking profile for an event.
///
/// PUT /api/v1/events/:event_id/match-profile
pub async fn upsert_match_profile(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Extension(auth): Extension<UserAuth>,
    Json(request): Json<UpsertMatchProfileRequest>,
) -> Result<Json<MatchProfile>, ApiError> {
    request.validate()?;

    let events = EventRepository::new(state.pool.clone());
    events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    let repo = MatchProfileRepository::new(state.pool.clone());
    let profile = repo
        .upsert(
            auth.user_id,
            event_id,
            request.headline.as_deref(),
            request.bio.as_deref(),
            &request.interests,
            &request.goals,
        )
        .await?;

    tracing::info!(user_id = %auth.user_id, event_id = %event_id, "match profile saved");

    Ok(Json(profile.into()))
}

/// Get the caller's matchmaking profile for an event.
///
/// GET /api/v1/events/:event_id/match-profile
pub async fn get_match_profile(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Extension(auth): Extension<UserAuth>,
) -> Result<Json<MatchProfile>, ApiError> {
    let repo = MatchProfileRepository::new(state.pool.clone());

    let profile = repo
        .find_by_user_event(auth.user_id, event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Match profile not found".to_string()))?;

    Ok(Json(profile.into()))
}
