//! Chat handler: one query in, one recommendation out.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /chat - Run the agent for the caller's query.
pub async fn chat(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let start = Instant::now();
    let response = state.chat.process(&body.query, &user.profile()).await?;
    tracing::info!(
        user_id = %user.id,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "chat turn completed"
    );
    Ok(Json(ChatResponse { response }))
}
