//! Registration domain model and check-in request types.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use shared::validation::{validate_qr_payload, validate_short_code};

/// Characters used in badge short codes. Ambiguity is acceptable here
/// because codes are scanned far more often than typed.
const SHORT_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated badge short code.
pub const SHORT_CODE_LEN: usize = 6;

/// Generates a random badge short code (e.g. "AB12CD").
///
/// Uniqueness within an event is enforced by the database; callers retry
/// on collision.
pub fn generate_short_code() -> String {
    let mut rng = rand::thread_rng();
    (0..SHORT_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..SHORT_CODE_CHARSET.len());
            SHORT_CODE_CHARSET[idx] as char
        })
        .collect()
}

/// A single attendee's enrollment record for one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    /// Linked account, when the attendee registered while signed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Ticket category ("attendee", "speaker", ...).
    #[serde(rename = "type")]
    pub registration_type: String,
    /// Payload printed in the badge QR code. Equal to `short_code` on
    /// badges printed by this system; legacy badges carry a long form.
    pub qr_code: String,
    /// Human-enterable badge code, the primary check-in key.
    pub short_code: String,
    pub checked_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for registering an attendee.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Ticket category; defaults to "attendee".
    #[validate(length(min = 1, max = 50, message = "Type must be between 1 and 50 characters"))]
    #[serde(rename = "type", default = "default_registration_type")]
    pub registration_type: String,

    /// Linked account id, if the attendee has one.
    pub user_id: Option<Uuid>,
}

fn default_registration_type() -> String {
    "attendee".to_string()
}

/// The identifier a check-in call resolves a registration by.
///
/// Exactly one variant per request; the request body's optional fields are
/// folded into this enum at the API boundary so downstream code never
/// inspects which JSON keys were present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInIdentifier {
    /// Scanned QR payload. Matched against `short_code` first, falling
    /// back to the legacy `qr_code` column.
    QrCode(String),
    /// Badge short code, matched exactly.
    ShortCode(String),
    /// Registration email, matched exactly as stored.
    Email(String),
    /// Registration id.
    ParticipantId(Uuid),
}

impl CheckInIdentifier {
    /// Label used in log lines and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::QrCode(_) => "qr_code",
            Self::ShortCode(_) => "short_code",
            Self::Email(_) => "email",
            Self::ParticipantId(_) => "participant_id",
        }
    }
}

/// Request body for checking an attendee in.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub event_id: Uuid,

    #[validate(custom(function = "validate_qr_payload_opt"))]
    pub qr_code: Option<String>,

    #[validate(custom(function = "validate_short_code_opt"))]
    pub short_code: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    pub participant_id: Option<Uuid>,
}

fn validate_qr_payload_opt(payload: &str) -> Result<(), ValidationError> {
    validate_qr_payload(payload)
}

fn validate_short_code_opt(code: &str) -> Result<(), ValidationError> {
    validate_short_code(code)
}

impl CheckInRequest {
    /// Folds the optional identifier fields into the single identifier this
    /// request carries.
    ///
    /// Returns an error message suitable for a 400 response when zero or
    /// more than one identifier field is present.
    pub fn identifier(&self) -> Result<CheckInIdentifier, &'static str> {
        let mut found: Option<CheckInIdentifier> = None;

        let candidates = [
            self.qr_code.clone().map(CheckInIdentifier::QrCode),
            self.short_code.clone().map(CheckInIdentifier::ShortCode),
            self.email.clone().map(CheckInIdentifier::Email),
            self.participant_id.map(CheckInIdentifier::ParticipantId),
        ];

        for candidate in candidates.into_iter().flatten() {
            if found.is_some() {
                return Err("Exactly one of qrCode, shortCode, email or participantId is required");
            }
            found = Some(candidate);
        }

        found.ok_or("One of qrCode, shortCode, email or participantId is required")
    }
}

/// Response body for a check-in call, fresh or idempotent replay.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    pub message: String,
    pub registration: Registration,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_in_request() -> CheckInRequest {
        CheckInRequest {
            event_id: Uuid::new_v4(),
            qr_code: None,
            short_code: None,
            email: None,
            participant_id: None,
        }
    }

    #[test]
    fn test_generate_short_code_shape() {
        for _ in 0..100 {
            let code = generate_short_code();
            assert_eq!(code.len(), SHORT_CODE_LEN);
            assert!(code
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
            assert!(validate_short_code(&code).is_ok());
        }
    }

    #[test]
    fn test_identifier_requires_exactly_one_field() {
        let req = check_in_request();
        assert!(req.identifier().is_err());

        let mut req = check_in_request();
        req.short_code = Some("AB12CD".to_string());
        assert_eq!(
            req.identifier().unwrap(),
            CheckInIdentifier::ShortCode("AB12CD".to_string())
        );

        let mut req = check_in_request();
        req.short_code = Some("AB12CD".to_string());
        req.email = Some("a@example.com".to_string());
        assert!(req.identifier().is_err());
    }

    #[test]
    fn test_identifier_each_kind() {
        let mut req = check_in_request();
        req.qr_code = Some("payload".to_string());
        assert_eq!(req.identifier().unwrap().kind(), "qr_code");

        let mut req = check_in_request();
        req.email = Some("a@example.com".to_string());
        assert_eq!(req.identifier().unwrap().kind(), "email");

        let mut req = check_in_request();
        let id = Uuid::new_v4();
        req.participant_id = Some(id);
        assert_eq!(
            req.identifier().unwrap(),
            CheckInIdentifier::ParticipantId(id)
        );
    }

    #[test]
    fn test_check_in_request_validation() {
        let mut req = check_in_request();
        req.short_code = Some("ab12cd".to_string());
        assert!(req.validate().is_err());

        req.short_code = Some("AB12CD".to_string());
        assert!(req.validate().is_ok());

        let mut req = check_in_request();
        req.email = Some("not-an-email".to_string());
        assert!(req.validate().is_err());

        let mut req = check_in_request();
        req.qr_code = Some(String::new());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_registration_request_validation() {
        let req = CreateRegistrationRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            registration_type: "attendee".to_string(),
            user_id: None,
        };
        assert!(req.validate().is_ok());

        let mut bad = req.clone();
        bad.email = "nope".to_string();
        assert!(bad.validate().is_err());

        let mut bad = req;
        bad.first_name = String::new();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_registration_serializes_type_field() {
        let registration = Registration {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_id: None,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            registration_type: "speaker".to_string(),
            qr_code: "AB12CD".to_string(),
            short_code: "AB12CD".to_string(),
            checked_in: false,
            check_in_time: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["type"], "speaker");
        assert_eq!(json["shortCode"], "AB12CD");
        assert_eq!(json["checkedIn"], false);
        assert!(json.get("checkInTime").is_none());
    }
}
