//! Registration endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_registration_created;
use domain::models::{generate_short_code, CreateRegistrationRequest, Registration};
use persistence::repositories::{EventRepository, RegistrationRepository};
use shared::pagination::{decode_cursor, encode_cursor};

/// Attempts to insert a registration before giving up on short-code
/// collisions.
const SHORT_CODE_RETRIES: usize = 3;

/// Default page size for registration listing.
const DEFAULT_PAGE_SIZE: i64 = 50;
/// Maximum page size for registration listing.
const MAX_PAGE_SIZE: i64 = 200;

/// Query parameters for registration listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRegistrationsQuery {
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// Response for registration listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRegistrationsResponse {
    pub registrations: Vec<Registration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Register an attendee for an event.
///
/// POST /api/v1/events/:event_id/registrations
pub async fn create_registration(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<CreateRegistrationRequest>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    request.validate()?;

    let events = EventRepository::new(state.pool.clone());
    events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    let repo = RegistrationRepository::new(state.pool.clone());

    // Short codes are random; retry with a fresh code when one collides.
    // An email conflict is a caller error and surfaces as 409 immediately.
    let mut last_err: Option<sqlx::Error> = None;
    for _ in 0..SHORT_CODE_RETRIES {
        let short_code = generate_short_code();
        match repo
            .create(
                event_id,
                request.user_id,
                &request.first_name,
                &request.last_name,
                &request.email,
                &request.registration_type,
                &short_code,
                &short_code,
            )
            .await
        {
            Ok(registration) => {
                record_registration_created();
                tracing::info!(
                    registration_id = %registration.id,
                    event_id = %event_id,
                    "registration created"
                );
                return Ok((StatusCode::CREATED, Json(registration.into())));
            }
            Err(e) if is_short_code_collision(&e) => {
                last_err = Some(e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    match last_err {
        Some(e) => Err(e.into()),
        None => Err(ApiError::Internal(anyhow::anyhow!(
            "registration insert failed without error"
        ))),
    }
}

/// Whether an insert failure is a unique violation on the short-code key
/// (as opposed to the per-event email key).
fn is_short_code_collision(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err
                    .constraint()
                    .map(|c| c.contains("short_code"))
                    .unwrap_or(false)
        }
        _ => false,
    }
}

/// List registrations for an event, cursor-paginated in creation order.
///
/// GET /api/v1/events/:event_id/registrations?cursor=<c>&limit=<n>
pub async fn list_registrations(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(query): Query<ListRegistrationsQuery>,
) -> Result<Json<ListRegistrationsResponse>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let after = match &query.cursor {
        Some(cursor) => Some(
            decode_cursor(cursor)
                .map_err(|e| ApiError::Validation(format!("Invalid cursor: {}", e)))?,
        ),
        None => None,
    };

    let repo = RegistrationRepository::new(state.pool.clone());
    // Fetch one extra row to know whether another page exists
    let mut rows = repo.list_page(event_id, after, limit + 1).await?;

    let next_cursor = if rows.len() as i64 > limit {
        rows.truncate(limit as usize);
        rows.last()
            .map(|last| encode_cursor(last.created_at, last.id))
    } else {
        None
    };

    Ok(Json(ListRegistrationsResponse {
        registrations: rows.into_iter().map(Into::into).collect(),
        next_cursor,
    }))
}
