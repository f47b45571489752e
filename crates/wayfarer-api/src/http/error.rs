//! Application error type mapping to HTTP status codes and `{"detail"}` bodies.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use wayfarer_types::error::{AuthError, ChatError};

const CREDENTIALS_DETAIL: &str = "Could not validate credentials";
const INTERNAL_DETAIL: &str = "Internal Server Error";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Client-side auth failures (duplicate email, bad login, bad token).
    Auth(AuthError),
    /// Chat turn failures.
    Chat(ChatError),
    /// No bearer token presented.
    NotAuthenticated,
    /// Server-side failure. `detail` is shown, `source` is only logged.
    Internal {
        detail: &'static str,
        source: String,
    },
}

impl AppError {
    /// Map an auth error, replacing the detail of server-side failures
    /// with `detail` (e.g. "User could not be created").
    pub fn auth_or(detail: &'static str) -> impl FnOnce(AuthError) -> AppError {
        move |err| match err {
            AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::StorageError(_) => {
                AppError::Internal {
                    detail,
                    source: err.to_string(),
                }
            }
            other => AppError::Auth(other),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::auth_or(INTERNAL_DETAIL)(e)
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Auth(AuthError::InvalidToken | AuthError::TokenExpired) => {
                (StatusCode::UNAUTHORIZED, CREDENTIALS_DETAIL.to_string())
            }
            AppError::Auth(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Chat(ChatError::EmptyQuery) => {
                (StatusCode::BAD_REQUEST, ChatError::EmptyQuery.to_string())
            }
            AppError::Chat(e) => {
                tracing::error!(error = %e, "chat turn failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_DETAIL.to_string())
            }
            AppError::NotAuthenticated => {
                (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
            }
            AppError::Internal { detail, source } => {
                tracing::error!(error = %source, "{detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, detail.to_string())
            }
        };

        let mut response = (status, Json(json!({ "detail": detail }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
