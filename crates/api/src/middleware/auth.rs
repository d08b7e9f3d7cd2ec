//! JWT authentication and role-gating middleware.
//!
//! Tokens are issued by the external identity service; this layer only
//! validates them and exposes the authenticated identity to handlers.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::app::AppState;
use domain::models::UserRole;
use shared::jwt::JwtConfig;

/// Authenticated user information extracted from JWT.
#[derive(Debug, Clone)]
pub struct UserAuth {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    /// Application role from the JWT role claim.
    pub role: UserRole,
    /// JWT ID (jti) for session tracking.
    #[allow(dead_code)] // Kept for log correlation
    pub jti: String,
}

impl UserAuth {
    /// Validates an access token and returns user authentication info.
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, String> {
        let claims = jwt_config
            .validate_access_token(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| "Invalid user ID in token".to_string())?;

        let role = UserRole::parse(&claims.role)
            .ok_or_else(|| format!("Unknown role in token: {}", claims.role))?;

        Ok(UserAuth {
            user_id,
            role,
            jti: claims.jti,
        })
    }
}

/// Middleware that requires JWT user authentication.
///
/// Validates the Bearer token in the Authorization header and rejects
/// requests without a valid JWT. Authenticated user information is stored
/// in request extensions for downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    match UserAuth::validate(&state.jwt, token) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            unauthorized_response("Invalid or expired token")
        }
    }
}

/// Middleware that requires a staff or organizer role.
///
/// Must run after [`require_auth`]; a missing [`UserAuth`] extension is
/// treated as unauthenticated.
pub async fn require_staff(req: Request<Body>, next: Next) -> Response {
    match req.extensions().get::<UserAuth>() {
        Some(auth) if auth.role.is_staff() => next.run(req).await,
        Some(auth) => {
            tracing::debug!(user_id = %auth.user_id, role = %auth.role, "staff role required");
            forbidden_response("Staff role required")
        }
        None => unauthorized_response("Missing or invalid Authorization header"),
    }
}

/// Helper to create unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

/// Helper to create forbidden response.
fn forbidden_response(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_jwt_config() -> JwtConfig {
        JwtConfig::from_secret("test-secret", 3600, 86400, 0)
    }

    #[test]
    fn test_unauthorized_response_status() {
        let response = unauthorized_response("Test message");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_forbidden_response_status() {
        let response = forbidden_response("Staff role required");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_validate_valid_token() {
        let config = test_jwt_config();
        let user_id = Uuid::new_v4();
        let (token, jti) = config.generate_access_token(user_id, "staff").unwrap();

        let auth = UserAuth::validate(&config, &token).unwrap();
        assert_eq!(auth.user_id, user_id);
        assert_eq!(auth.role, UserRole::Staff);
        assert_eq!(auth.jti, jti);
    }

    #[test]
    fn test_validate_rejects_garbage_token() {
        let config = test_jwt_config();
        assert!(UserAuth::validate(&config, "not-a-jwt").is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_role() {
        let config = test_jwt_config();
        let (token, _) = config
            .generate_access_token(Uuid::new_v4(), "superuser")
            .unwrap();
        let err = UserAuth::validate(&config, &token).unwrap_err();
        assert!(err.contains("Unknown role"));
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let config = test_jwt_config();
        let other = JwtConfig::from_secret("other-secret", 3600, 86400, 0);
        let (token, _) = other
            .generate_access_token(Uuid::new_v4(), "attendee")
            .unwrap();
        assert!(UserAuth::validate(&config, &token).is_err());
    }

    #[test]
    fn test_user_auth_clone() {
        let auth = UserAuth {
            user_id: Uuid::new_v4(),
            role: UserRole::Attendee,
            jti: "test_jti".to_string(),
        };
        let cloned = auth.clone();
        assert_eq!(auth.user_id, cloned.user_id);
        assert_eq!(auth.role, cloned.role);
    }
}
