//! HS256 JWT bearer tokens.
//!
//! Implements the `TokenIssuer` trait from `wayfarer-core` with the
//! `jsonwebtoken` crate. Claims are `sub` (email), `iat`, and `exp`;
//! validation applies no clock leeway.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use wayfarer_core::auth::token::TokenIssuer;
use wayfarer_types::auth::{ACCESS_TOKEN_EXPIRE_MINUTES, AccessToken, Claims, TokenValidation};
use wayfarer_types::error::AuthError;

/// Signs and verifies access tokens with a shared secret.
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl JwtTokenIssuer {
    /// Issuer with the standard 30-minute token lifetime.
    pub fn new(secret: &SecretString) -> Self {
        Self::with_lifetime(secret, Duration::minutes(ACCESS_TOKEN_EXPIRE_MINUTES))
    }

    pub fn with_lifetime(secret: &SecretString, lifetime: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation,
            lifetime,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: &str) -> Result<AccessToken, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::bearer)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn validate(&self, token: &str) -> TokenValidation {
        match jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => TokenValidation::Valid(data.claims),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => TokenValidation::Expired,
            Err(e) => {
                tracing::debug!(error = %e, "rejected bearer token");
                TokenValidation::Invalid
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[test]
    fn test_issue_and_validate() {
        let issuer = JwtTokenIssuer::new(&secret("test-secret"));
        let token = issuer.issue("a@x.com").unwrap();
        assert_eq!(token.token_type, "bearer");

        let claims = issuer.validate(&token.access_token).claims().unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_expired_token() {
        let issuer = JwtTokenIssuer::with_lifetime(&secret("test-secret"), Duration::minutes(-5));
        let token = issuer.issue("a@x.com").unwrap();
        assert_eq!(issuer.validate(&token.access_token), TokenValidation::Expired);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let issuer = JwtTokenIssuer::new(&secret("secret-one"));
        let other = JwtTokenIssuer::new(&secret("secret-two"));
        let token = issuer.issue("a@x.com").unwrap();
        assert_eq!(other.validate(&token.access_token), TokenValidation::Invalid);
    }

    #[test]
    fn test_garbage_is_invalid() {
        let issuer = JwtTokenIssuer::new(&secret("test-secret"));
        assert_eq!(issuer.validate("not.a.jwt"), TokenValidation::Invalid);
        assert_eq!(issuer.validate(""), TokenValidation::Invalid);
    }
}
