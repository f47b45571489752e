//! Configuration loader for Wayfarer.
//!
//! Reads `config.toml` (by default from the data directory, `~/.wayfarer/`
//! in production) and deserializes it into [`AppConfig`]. A missing file
//! means defaults; a malformed one is reported to the caller.

use std::path::{Path, PathBuf};

use wayfarer_types::config::AppConfig;

use crate::sqlite::pool::default_database_url;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "WAYFARER_DATA_DIR";

/// Resolve the data directory: `WAYFARER_DATA_DIR`, else `~/.wayfarer`.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".wayfarer")
}

/// Default location of `config.toml` inside the data directory.
pub fn default_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Why a config file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load configuration from `config_path`.
///
/// A missing file is not an error and yields [`AppConfig::default()`].
/// Callers fall back to defaults on error too, but get to log the reason
/// once their subscriber is installed.
pub async fn load_config(config_path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: config_path.display().to_string(),
                source,
            });
        }
    };

    toml::from_str::<AppConfig>(&content).map_err(|source| ConfigError::Parse {
        path: config_path.display().to_string(),
        source,
    })
}

/// Database URL from `[database] url`, else the data-directory default.
pub fn resolve_database_url(config: &AppConfig, data_dir: &Path) -> String {
    config
        .database
        .url
        .clone()
        .unwrap_or_else(|| default_database_url(data_dir))
}

/// Embedding model cache from `[memory] cache_dir`, else `{data_dir}/models`.
pub fn resolve_model_cache_dir(config: &AppConfig, data_dir: &Path) -> PathBuf {
    config
        .memory
        .cache_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join("models"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&default_config_path(tmp.path())).await.unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.agent.max_iterations, 15);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = default_config_path(tmp.path());
        tokio::fs::write(
            &config_path,
            r#"
[server]
port = 8080

[weather]
timeout_secs = 3

[memory]
embedding_model = "bge-small-en-v1.5"
"#,
        )
        .await
        .unwrap();

        let config = load_config(&config_path).await.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.weather.timeout_secs, 3);
        assert_eq!(config.memory.embedding_model, "bge-small-en-v1.5");
        assert_eq!(config.memory.dimension, 384);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = default_config_path(tmp.path());
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let err = load_config(&config_path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn resolve_database_url_prefers_config() {
        let mut config = AppConfig::default();
        let dir = Path::new("/data");
        assert_eq!(
            resolve_database_url(&config, dir),
            "sqlite:///data/wayfarer.db?mode=rwc"
        );

        config.database.url = Some("sqlite::memory:".to_string());
        assert_eq!(resolve_database_url(&config, dir), "sqlite::memory:");
    }

    #[test]
    fn resolve_model_cache_dir_defaults_under_data_dir() {
        let config = AppConfig::default();
        assert_eq!(
            resolve_model_cache_dir(&config, Path::new("/data")),
            PathBuf::from("/data/models")
        );
    }
}
