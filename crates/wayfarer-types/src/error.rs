use thiserror::Error;

use crate::llm::LlmError;

/// Errors related to signup, login, token checks, and profile updates.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),

    /// Unknown email and wrong password share this variant on purpose.
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("token expired")]
    TokenExpired,

    #[error("password hashing error: {0}")]
    Hashing(String),

    #[error("token signing error: {0}")]
    Signing(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from the embedding memory store.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("embedding error: {0}")]
    Embedding(String),

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Errors from processing a chat turn.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Query is required.")]
    EmptyQuery,

    #[error("agent error: {0}")]
    Agent(#[from] LlmError),

    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),
}

/// Errors from repository operations (used by trait definitions in wayfarer-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::EmailTaken.to_string(), "Email already registered");
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Incorrect email or password"
        );
    }

    #[test]
    fn test_memory_error_display() {
        let err = MemoryError::DimensionMismatch {
            expected: 384,
            actual: 768,
        };
        assert!(err.to_string().contains("384"));
        assert!(err.to_string().contains("768"));
    }

    #[test]
    fn test_chat_error_from_llm() {
        let err: ChatError = LlmError::AuthenticationFailed.into();
        assert!(matches!(err, ChatError::Agent(LlmError::AuthenticationFailed)));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
