//! Identity and session logic.
//!
//! `PasswordHasher` and `TokenIssuer` are ports implemented in wayfarer-infra
//! (argon2 and JWT respectively). `AuthService` combines them with a
//! `UserRepository` to implement signup, login, token checks, and profile
//! updates.

pub mod password;
pub mod service;
pub mod token;
