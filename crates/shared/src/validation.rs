//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Length of a badge short code.
pub const SHORT_CODE_LEN: usize = 6;

/// Maximum length of a QR payload accepted for check-in.
pub const MAX_QR_PAYLOAD_LEN: usize = 255;

/// Maximum number of interests or goals on a matchmaking profile.
pub const MAX_TAGS: usize = 20;

/// Maximum length of a single interest or goal.
pub const MAX_TAG_LEN: usize = 60;

lazy_static! {
    /// Badge short codes are six uppercase alphanumerics (e.g. "AB12CD").
    static ref SHORT_CODE_RE: Regex = Regex::new(r"^[A-Z0-9]{6}$").unwrap();
}

/// Validates a badge short code (six uppercase alphanumerics).
pub fn validate_short_code(code: &str) -> Result<(), ValidationError> {
    if SHORT_CODE_RE.is_match(code) {
        Ok(())
    } else {
        let mut err = ValidationError::new("short_code_format");
        err.message = Some("Short code must be 6 uppercase letters or digits".into());
        Err(err)
    }
}

/// Validates a scanned QR payload: non-empty, bounded length.
///
/// Legacy badges may carry an opaque long-form payload, so no character
/// class is enforced beyond printability limits.
pub fn validate_qr_payload(payload: &str) -> Result<(), ValidationError> {
    if payload.is_empty() || payload.len() > MAX_QR_PAYLOAD_LEN {
        let mut err = ValidationError::new("qr_payload_length");
        err.message = Some("QR payload must be between 1 and 255 characters".into());
        return Err(err);
    }
    if payload.chars().any(|c| c.is_control()) {
        let mut err = ValidationError::new("qr_payload_chars");
        err.message = Some("QR payload must not contain control characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a list of interests or goals: bounded count, each entry
/// non-blank and bounded length.
pub fn validate_tag_list(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        let mut err = ValidationError::new("tag_list_count");
        err.message = Some("At most 20 entries are allowed".into());
        return Err(err);
    }
    for tag in tags {
        if tag.trim().is_empty() || tag.len() > MAX_TAG_LEN {
            let mut err = ValidationError::new("tag_length");
            err.message = Some("Each entry must be between 1 and 60 characters".into());
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_short_code() {
        assert!(validate_short_code("AB12CD").is_ok());
        assert!(validate_short_code("000000").is_ok());
        assert!(validate_short_code("ZZZZZZ").is_ok());
    }

    #[test]
    fn test_invalid_short_code() {
        assert!(validate_short_code("ab12cd").is_err()); // lowercase
        assert!(validate_short_code("AB12C").is_err()); // too short
        assert!(validate_short_code("AB12CDE").is_err()); // too long
        assert!(validate_short_code("AB 2CD").is_err()); // whitespace
        assert!(validate_short_code("").is_err());
    }

    #[test]
    fn test_valid_qr_payload() {
        assert!(validate_qr_payload("AB12CD").is_ok());
        assert!(validate_qr_payload("evz:5f3a2c1e-legacy-payload").is_ok());
    }

    #[test]
    fn test_invalid_qr_payload() {
        assert!(validate_qr_payload("").is_err());
        assert!(validate_qr_payload(&"x".repeat(256)).is_err());
        assert!(validate_qr_payload("abc\ndef").is_err());
    }

    #[test]
    fn test_qr_payload_max_length_boundary() {
        assert!(validate_qr_payload(&"x".repeat(255)).is_ok());
    }

    #[test]
    fn test_valid_tag_list() {
        let tags = vec!["AI".to_string(), "Marketing".to_string()];
        assert!(validate_tag_list(&tags).is_ok());
        assert!(validate_tag_list(&[]).is_ok());
    }

    #[test]
    fn test_tag_list_too_many() {
        let tags: Vec<String> = (0..21).map(|i| format!("tag{}", i)).collect();
        assert!(validate_tag_list(&tags).is_err());
    }

    #[test]
    fn test_tag_list_blank_entry() {
        let tags = vec!["AI".to_string(), "   ".to_string()];
        assert!(validate_tag_list(&tags).is_err());
    }

    #[test]
    fn test_tag_list_entry_too_long() {
        let tags = vec!["x".repeat(61)];
        assert!(validate_tag_list(&tags).is_err());
    }
}
