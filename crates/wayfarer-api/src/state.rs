//! Application state wiring all services together.
//!
//! The services are generic over their ports; AppState pins them to the
//! concrete infra implementations and shares them with every handler.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use wayfarer_core::agent::executor::AgentExecutor;
use wayfarer_core::auth::service::AuthService;
use wayfarer_core::chat::orchestrator::ChatOrchestrator;
use wayfarer_core::memory::box_embedder::BoxEmbedder;
use wayfarer_core::memory::store::MemoryStore;
use wayfarer_infra::config::{resolve_database_url, resolve_model_cache_dir};
use wayfarer_infra::crypto::password::Argon2PasswordHasher;
use wayfarer_infra::crypto::token::JwtTokenIssuer;
use wayfarer_infra::llm::create_provider;
use wayfarer_infra::secret::Secrets;
use wayfarer_infra::sqlite::pool::DatabasePool;
use wayfarer_infra::sqlite::user::SqliteUserRepository;
use wayfarer_infra::tool::build_tool_registry;
use wayfarer_infra::vector::embedder::FastEmbedEmbedder;
use wayfarer_types::config::AppConfig;

/// Auth service pinned to SQLite, argon2, and JWT.
pub type ConcreteAuthService =
    AuthService<SqliteUserRepository, Argon2PasswordHasher, JwtTokenIssuer>;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<ConcreteAuthService>,
    pub chat: Arc<ChatOrchestrator>,
}

impl AppState {
    pub fn new(auth: ConcreteAuthService, chat: ChatOrchestrator) -> Self {
        Self {
            auth: Arc::new(auth),
            chat: Arc::new(chat),
        }
    }

    /// Connect to the database, load the embedding model, and build the
    /// agent from configuration.
    ///
    /// Fails fast when `SECRET_KEY` or the LLM key is missing, or when the
    /// embedding model disagrees with `[memory] dimension`.
    pub async fn init(config: &AppConfig, data_dir: &Path, secrets: Secrets) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir)
            .await
            .with_context(|| format!("creating data directory {}", data_dir.display()))?;

        let secret_key = secrets
            .secret_key
            .clone()
            .context("SECRET_KEY must be set to serve the API")?;

        let db_url = resolve_database_url(config, data_dir);
        let db_pool = DatabasePool::new(&db_url)
            .await
            .context("opening user database")?;
        let auth = AuthService::new(
            SqliteUserRepository::new(db_pool),
            Argon2PasswordHasher::new(),
            JwtTokenIssuer::new(&secret_key),
        );

        // ONNX session setup is blocking (and may download the model).
        let model_name = config.memory.embedding_model.clone();
        let cache_dir = resolve_model_cache_dir(config, data_dir);
        let embedder =
            tokio::task::spawn_blocking(move || FastEmbedEmbedder::load(&model_name, cache_dir))
                .await
                .context("embedding model loader panicked")??;
        embedder.ensure_dimension(config.memory.dimension)?;
        info!(
            model = %config.memory.embedding_model,
            dimension = config.memory.dimension,
            "embedding model ready"
        );
        let memory = Arc::new(MemoryStore::new(BoxEmbedder::new(embedder)));

        let provider = create_provider(&config.llm, secrets.llm_api_key.clone()).with_context(
            || format!("configuring LLM provider (key from ${})", config.llm.api_key_env),
        )?;
        let tools = build_tool_registry(config, &secrets)?;
        info!(
            provider = provider.name(),
            model = %config.llm.model,
            tools = ?tools.names(),
            "agent configured"
        );
        let agent = AgentExecutor::new(provider, tools, config.agent_config());

        Ok(Self::new(auth, ChatOrchestrator::new(memory, agent)))
    }
}
