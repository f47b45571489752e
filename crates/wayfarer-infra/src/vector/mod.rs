//! Local embedding generation for the memory store.
//!
//! Provides the fastembed-based implementation of the core `Embedder`
//! port. The flat index itself lives in wayfarer-core.

pub mod embedder;
