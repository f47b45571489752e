//! FastEmbed-based local embedding generator.
//!
//! Implements the `Embedder` trait from `wayfarer-core` using fastembed
//! sentence-embedding models with ONNX runtime inference. The default is
//! `all-MiniLM-L6-v2` (384 dimensions).

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use wayfarer_core::memory::embedder::Embedder;
use wayfarer_types::error::MemoryError;

/// Supported model names and their output dimensions.
fn resolve_model(name: &str) -> Result<(EmbeddingModel, usize), MemoryError> {
    let normalized = name
        .trim()
        .trim_start_matches("sentence-transformers/")
        .trim_start_matches("Qdrant/")
        .to_lowercase();
    match normalized.as_str() {
        "all-minilm-l6-v2" => Ok((EmbeddingModel::AllMiniLML6V2, 384)),
        "all-minilm-l12-v2" => Ok((EmbeddingModel::AllMiniLML12V2, 384)),
        "bge-small-en-v1.5" => Ok((EmbeddingModel::BGESmallENV15, 384)),
        "bge-base-en-v1.5" => Ok((EmbeddingModel::BGEBaseENV15, 768)),
        _ => Err(MemoryError::Embedding(format!(
            "unsupported embedding model '{name}'"
        ))),
    }
}

/// Local sentence embedder.
///
/// The ONNX session is not safe to drive from several threads at once, so
/// it sits behind a mutex and every call runs on the blocking pool.
pub struct FastEmbedEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
    model_name: String,
    dimension: usize,
}

impl FastEmbedEmbedder {
    /// Load (downloading on first use) the named model into `cache_dir`.
    ///
    /// This blocks; call it from `spawn_blocking` inside async code.
    pub fn load(model_name: &str, cache_dir: PathBuf) -> Result<Self, MemoryError> {
        let (model, dimension) = resolve_model(model_name)?;
        let options = InitOptions::new(model)
            .with_cache_dir(cache_dir)
            .with_show_download_progress(false);
        let embedding =
            TextEmbedding::try_new(options).map_err(|e| MemoryError::Embedding(e.to_string()))?;

        info!(model = model_name, dimension, "embedding model loaded");
        Ok(Self {
            model: Arc::new(Mutex::new(embedding)),
            model_name: model_name.to_string(),
            dimension,
        })
    }

    /// Fail early when configuration disagrees with the model.
    pub fn ensure_dimension(&self, expected: usize) -> Result<(), MemoryError> {
        if expected != self.dimension {
            return Err(MemoryError::DimensionMismatch {
                expected,
                actual: self.dimension,
            });
        }
        Ok(())
    }
}

impl Embedder for FastEmbedEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, MemoryError> {
        let model = Arc::clone(&self.model);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| MemoryError::Embedding("embedding model lock poisoned".to_string()))?;
            model
                .embed(texts, None)
                .map_err(|e| MemoryError::Embedding(e.to_string()))
        })
        .await
        .map_err(|e| MemoryError::Embedding(format!("embedding task failed: {e}")))?
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
