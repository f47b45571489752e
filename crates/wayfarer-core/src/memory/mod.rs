//! Embedding memory for Wayfarer.
//!
//! Agent responses are embedded and appended to an exact flat L2 index;
//! new queries retrieve the nearest prior responses as prompt context.
//! The `Embedder` port is implemented in wayfarer-infra (fastembed).

pub mod box_embedder;
pub mod embedder;
pub mod index;
pub mod store;
