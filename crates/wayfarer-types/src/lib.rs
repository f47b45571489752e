//! Shared domain types for Wayfarer.
//!
//! This crate contains the core domain types used across the Wayfarer
//! travel assistant: users and profiles, bearer-token claims, memory search
//! hits, LLM request/response shapes, configuration, and error enums.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod agent;
pub mod auth;
pub mod config;
pub mod error;
pub mod llm;
pub mod memory;
pub mod user;
