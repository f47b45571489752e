//! PasswordHasher trait for salted password storage.
//!
//! Defined in wayfarer-core so the auth service can hash and verify
//! passwords without coupling to a specific algorithm. The
//! `Argon2PasswordHasher` adapter lives in wayfarer-infra.

use wayfarer_types::error::AuthError;

/// Abstraction over one-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted, self-describing hash string for storage.
    fn hash_password(&self, password: &str) -> Result<String, AuthError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// A malformed stored hash is an error; a mismatch is `Ok(false)`.
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}
