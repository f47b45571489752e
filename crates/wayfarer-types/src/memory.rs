//! Memory store search results.

use serde::{Deserialize, Serialize};

/// Dimensionality of `all-MiniLM-L6-v2` sentence embeddings.
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 384;

/// A stored text returned by a nearest-neighbor search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryHit {
    /// Ordinal position in the store (the entry's only identity).
    pub position: usize,
    /// The stored text.
    pub text: String,
    /// Squared Euclidean distance between the query and stored embeddings.
    pub distance: f32,
}
