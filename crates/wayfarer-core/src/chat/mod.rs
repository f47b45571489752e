//! Chat turn orchestration for Wayfarer.
//!
//! `ChatOrchestrator` turns a user query plus profile into an agent prompt,
//! enriched with the nearest prior response from the memory store, and
//! records every answer back into that store.

pub mod orchestrator;
