//! Signup and login handlers.

use axum::extract::State;
use axum::{Form, Json};

use wayfarer_types::auth::{AccessToken, LoginForm};
use wayfarer_types::user::{SignupRequest, UserProfile};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /signup - Register a new user from a JSON body.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state
        .auth
        .signup(body)
        .await
        .map_err(AppError::auth_or("User could not be created"))?;
    Ok(Json(profile))
}

/// POST /login - Exchange form-encoded `username`/`password` for a token.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<AccessToken>, AppError> {
    let token = state.auth.login(&form).await?;
    Ok(Json(token))
}
