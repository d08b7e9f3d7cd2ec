//! Event endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;
use domain::models::{CreateEventRequest, Event};
use persistence::repositories::EventRepository;

/// Create an event.
///
/// POST /api/v1/events
pub async fn create_event(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    request.validate()?;
    if !request.schedule_is_ordered() {
        return Err(ApiError::Validation(
            "startsAt must be before endsAt".to_string(),
        ));
    }

    let repo = EventRepository::new(state.pool.clone());

    let event = repo
        .create(
            &request.name,
            &request.slug,
            request.location.as_deref(),
            request.starts_at,
            request.ends_at,
            Some(auth.user_id),
        )
        .await
        .map_err(|e| match ApiError::from(e) {
            // The only unique constraint on events is the slug
            ApiError::Conflict(_) => ApiError::Conflict("Slug already in use".to_string()),
            other => other,
        })?;

    tracing::info!(event_id = %event.id, slug = %event.slug, "event created");

    Ok((StatusCode::CREATED, Json(event.into())))
}

/// Get an event by id.
///
/// GET /api/v1/events/:event_id
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    let repo = EventRepository::new(state.pool.clone());

    let event = repo
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    Ok(Json(event.into()))
}
