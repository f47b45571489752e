//! Saved login session: `{data_dir}/session.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const SESSION_FILE: &str = "session.json";

/// What `wayfarer login` remembers between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub access_token: String,
}

pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE)
}

/// Load the saved session. A missing or unreadable file means logged out.
pub async fn load(data_dir: &Path) -> Option<Session> {
    let content = tokio::fs::read_to_string(session_path(data_dir)).await.ok()?;
    match serde_json::from_str(&content) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("Ignoring malformed session file: {e}");
            None
        }
    }
}

pub async fn save(data_dir: &Path, session: &Session) -> Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .with_context(|| format!("creating {}", data_dir.display()))?;
    let path = session_path(data_dir);
    tokio::fs::write(&path, serde_json::to_string_pretty(session)?)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Forget the saved session. Returns whether one existed.
pub async fn clear(data_dir: &Path) -> Result<bool> {
    match tokio::fs::remove_file(session_path(data_dir)).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
