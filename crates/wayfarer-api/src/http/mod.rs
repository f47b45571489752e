//! HTTP/REST API layer for Wayfarer.
//!
//! Axum-based JSON API with bearer-token authentication. Errors use the
//! `{"detail": "..."}` body shape.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
