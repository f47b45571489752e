//! Profile read and update handlers.

use axum::Json;
use axum::extract::State;

use wayfarer_types::user::{UpdateProfileRequest, UserProfile};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

/// GET /profile - The caller's profile.
pub async fn get_profile(CurrentUser(user): CurrentUser) -> Json<UserProfile> {
    Json(user.profile())
}

/// PUT /profile - Replace the caller's name and preferences.
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state
        .auth
        .update_profile(&user, body)
        .await
        .map_err(AppError::auth_or("Profile update failed"))?;
    Ok(Json(profile))
}
