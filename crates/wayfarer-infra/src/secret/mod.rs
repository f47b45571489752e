//! Secret loading.
//!
//! All credentials come from environment variables and are wrapped in
//! `SecretString` so they never appear in `Debug` output or logs.

pub mod env;

pub use env::Secrets;
