//! Bearer-token types for login and request authentication.

use serde::{Deserialize, Serialize};

/// Access tokens live for a fixed 30 minutes.
pub const ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;

/// The `token_type` reported alongside every issued token.
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Claims carried inside a signed access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email.
    pub sub: String,
    /// Absolute expiry as a Unix timestamp (seconds).
    pub exp: i64,
    /// Issue time as a Unix timestamp (seconds).
    pub iat: i64,
}

/// Response body for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    /// Wrap an encoded token as a bearer token response.
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        }
    }
}

/// Form-encoded login body (`username` carries the email).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Outcome of checking a presented token.
///
/// There is no revoked state: a token stays valid until its `exp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidation {
    /// Signature checks out and the token has not expired.
    Valid(Claims),
    /// Signature checks out but `exp` is in the past.
    Expired,
    /// Malformed, wrong signature, wrong algorithm, or missing claims.
    Invalid,
}

impl TokenValidation {
    /// The claims, if the token is valid.
    pub fn claims(self) -> Option<Claims> {
        match self {
            TokenValidation::Valid(claims) => Some(claims),
            TokenValidation::Expired | TokenValidation::Invalid => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_type() {
        let token = AccessToken::bearer("abc".to_string());
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json, serde_json::json!({"access_token": "abc", "token_type": "bearer"}));
    }

    #[test]
    fn test_validation_claims() {
        let claims = Claims {
            sub: "a@x.com".to_string(),
            exp: 10,
            iat: 0,
        };
        assert_eq!(
            TokenValidation::Valid(claims.clone()).claims(),
            Some(claims)
        );
        assert_eq!(TokenValidation::Expired.claims(), None);
        assert_eq!(TokenValidation::Invalid.claims(), None);
    }
}
