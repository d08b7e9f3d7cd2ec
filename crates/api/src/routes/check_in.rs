//! Check-in endpoint handler.
//!
//! Resolves a single identifier (QR payload, badge short code, email or
//! registration id) to one registration within an event and transitions it
//! to checked-in. Repeat calls are idempotent: the stored check-in time is
//! assigned exactly once.

use axum::{extract::State, Extension, Json};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_check_in;
use crate::middleware::UserAuth;
use domain::models::{CheckInIdentifier, CheckInRequest, CheckInResponse};
use persistence::entities::RegistrationEntity;
use persistence::repositories::{EventRepository, RegistrationRepository};

/// Response message for a first successful check-in.
const CHECKED_IN_MESSAGE: &str = "Check-in successful";
/// Response message for the idempotent repeat.
const ALREADY_CHECKED_IN_MESSAGE: &str = "Participant already checked in";

/// Check an attendee in.
///
/// POST /api/v1/check-in
pub async fn check_in(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Json(request): Json<CheckInRequest>,
) -> Result<Json<CheckInResponse>, ApiError> {
    request.validate()?;
    let identifier = request
        .identifier()
        .map_err(|msg| ApiError::Validation(msg.to_string()))?;

    let events = EventRepository::new(state.pool.clone());
    events
        .find_by_id(request.event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    let repo = RegistrationRepository::new(state.pool.clone());
    let registration = resolve(&repo, request.event_id, &identifier)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    if registration.checked_in {
        tracing::info!(
            registration_id = %registration.id,
            event_id = %request.event_id,
            identifier = identifier.kind(),
            staff_id = %auth.user_id,
            "check-in replayed"
        );
        record_check_in("already_checked_in");
        return Ok(Json(CheckInResponse {
            message: ALREADY_CHECKED_IN_MESSAGE.to_string(),
            registration: registration.into(),
        }));
    }

    // The conditional update only fires while checked_in is still false,
    // so a concurrent check-in of the same registration leaves the first
    // timestamp untouched and this call falls through to the replay path.
    match repo.check_in(registration.id, Utc::now()).await? {
        Some(updated) => {
            tracing::info!(
                registration_id = %updated.id,
                event_id = %request.event_id,
                identifier = identifier.kind(),
                staff_id = %auth.user_id,
                "check-in completed"
            );
            record_check_in("checked_in");
            Ok(Json(CheckInResponse {
                message: CHECKED_IN_MESSAGE.to_string(),
                registration: updated.into(),
            }))
        }
        None => {
            // Lost the race; re-read the row for its actual check-in time
            let current = repo
                .find_by_id_in_event(request.event_id, registration.id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;
            record_check_in("already_checked_in");
            Ok(Json(CheckInResponse {
                message: ALREADY_CHECKED_IN_MESSAGE.to_string(),
                registration: current.into(),
            }))
        }
    }
}

/// Resolves the identifier to at most one registration within the event.
async fn resolve(
    repo: &RegistrationRepository,
    event_id: Uuid,
    identifier: &CheckInIdentifier,
) -> Result<Option<RegistrationEntity>, sqlx::Error> {
    match identifier {
        CheckInIdentifier::QrCode(payload) => repo.find_by_qr_payload(event_id, payload).await,
        CheckInIdentifier::ShortCode(code) => repo.find_by_short_code(event_id, code).await,
        CheckInIdentifier::Email(email) => repo.find_by_email(event_id, email).await,
        CheckInIdentifier::ParticipantId(id) => repo.find_by_id_in_event(event_id, *id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_messages_differ() {
        assert_ne!(CHECKED_IN_MESSAGE, ALREADY_CHECKED_IN_MESSAGE);
    }

    #[test]
    fn test_check_in_response_serialization() {
        let registration = domain::models::Registration {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_id: None,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            registration_type: "attendee".to_string(),
            qr_code: "AB12CD".to_string(),
            short_code: "AB12CD".to_string(),
            checked_in: true,
            check_in_time: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let response = CheckInResponse {
            message: CHECKED_IN_MESSAGE.to_string(),
            registration,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["message"], CHECKED_IN_MESSAGE);
        assert_eq!(json["registration"]["checkedIn"], true);
        assert!(json["registration"].get("checkInTime").is_some());
    }
}
