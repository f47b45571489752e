//! TokenIssuer trait for signed bearer tokens.

use wayfarer_types::auth::{AccessToken, TokenValidation};
use wayfarer_types::error::AuthError;

/// Issues and checks short-lived bearer tokens.
///
/// Tokens are stateless: nothing is persisted and nothing can be revoked.
/// The `JwtTokenIssuer` adapter lives in wayfarer-infra.
pub trait TokenIssuer: Send + Sync {
    /// Sign a token whose subject is `subject` (the user's email).
    fn issue(&self, subject: &str) -> Result<AccessToken, AuthError>;

    /// Check signature and expiry of a presented token.
    fn validate(&self, token: &str) -> TokenValidation;
}
