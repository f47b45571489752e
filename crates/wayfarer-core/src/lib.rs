//! Business logic and port trait definitions for Wayfarer.
//!
//! This crate defines the "ports" (repository, hashing, token, embedding,
//! LLM and tool traits) that the infrastructure layer implements, plus the
//! services built on top of them. It depends only on `wayfarer-types`,
//! never on `wayfarer-infra` or any database/IO crate.

pub mod agent;
pub mod auth;
pub mod chat;
pub mod llm;
pub mod memory;
pub mod repository;
pub mod tool;
