//! Cryptographic adapters.
//!
//! - `password`: argon2id password hashing (PHC strings)
//! - `token`: HS256 JWT bearer tokens

pub mod password;
pub mod token;
