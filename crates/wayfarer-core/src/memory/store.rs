//! Append-only text memory backed by an embedding model and a flat index.

use tokio::sync::RwLock;
use tracing::debug;

use wayfarer_types::error::MemoryError;
use wayfarer_types::memory::MemoryHit;

use super::box_embedder::BoxEmbedder;
use super::index::FlatL2Index;

/// Index and texts share one lock so a reader never sees a vector whose
/// text has not been appended yet.
struct Entries {
    index: FlatL2Index,
    texts: Vec<String>,
}

/// In-process similarity memory.
///
/// Constructed once at startup and shared through `Arc<MemoryStore>`.
/// Nothing is evicted, deduplicated, or persisted across restarts.
pub struct MemoryStore {
    embedder: BoxEmbedder,
    entries: RwLock<Entries>,
}

impl MemoryStore {
    /// Create an empty store whose index dimension matches the embedder.
    pub fn new(embedder: BoxEmbedder) -> Self {
        let index = FlatL2Index::new(embedder.dimension());
        debug!(
            model = embedder.model_name(),
            dimension = embedder.dimension(),
            "memory store created"
        );
        Self {
            embedder,
            entries: RwLock::new(Entries {
                index,
                texts: Vec::new(),
            }),
        }
    }

    /// Embed `text` and append it. Returns the new entry's position.
    pub async fn add(&self, text: &str) -> Result<usize, MemoryError> {
        let vector = self.embedder.embed_one(text).await?;

        let mut entries = self.entries.write().await;
        let position = entries.index.add(&vector)?;
        entries.texts.push(text.to_string());
        debug!(position, "memory entry added");
        Ok(position)
    }

    /// Return up to `k` stored texts nearest to `query`, nearest first.
    ///
    /// The query is embedded even when the store is empty, so embedding
    /// failures always surface.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<MemoryHit>, MemoryError> {
        let vector = self.embedder.embed_one(query).await?;

        let entries = self.entries.read().await;
        let hits = entries
            .index
            .search(&vector, k)?
            .into_iter()
            .filter_map(|(position, distance)| {
                entries.texts.get(position).map(|text| MemoryHit {
                    position,
                    text: text.clone(),
                    distance,
                })
            })
            .collect();
        Ok(hits)
    }

    /// Current number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.texts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
