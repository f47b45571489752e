//! Infrastructure layer for Wayfarer.
//!
//! Contains implementations of the port traits defined in `wayfarer-core`:
//! SQLite user storage, argon2 password hashing, JWT bearer tokens, the
//! fastembed embedder, hosted LLM providers, and the weather and travel
//! tools. Also owns configuration and secret loading.

pub mod config;
pub mod crypto;
pub mod llm;
pub mod secret;
pub mod sqlite;
pub mod tool;
pub mod vector;
