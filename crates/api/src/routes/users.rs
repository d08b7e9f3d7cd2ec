//! User endpoint handlers.

use axum::{extract::State, Extension, Json};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;
use domain::models::User;
use persistence::repositories::UserRepository;

/// Get the authenticated user's account.
///
/// GET /api/v1/me
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
) -> Result<Json<User>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());

    let user = repo
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}
