//! Session (bearer token) storage and retrieval.
//!
//! Stores the session in `${NTX_HOME}/session.json` with restricted
//! permissions (0600). Tokens are never logged or displayed in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// An authenticated session holding the bearer token.
///
/// Sessions are explicit values: the API client receives one per call rather
/// than reading token state from anywhere ambient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The opaque bearer token issued by the notes service.
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the raw token for the Authorization header.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns a masked version of the token for display (first 12 chars + ...).
    pub fn masked(&self) -> String {
        if self.token.len() <= 16 {
            return "***".to_string();
        }
        format!("{}...", &self.token[..12])
    }
}

/// Durable store for the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Opens the store at the default session path.
    pub fn open_default() -> Self {
        Self {
            path: paths::session_path(),
        }
    }

    /// Opens the store at a specific path (used by tests).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the session file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Loads the persisted session, if any.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        let session = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;
        Ok(Some(session))
    }

    /// Saves the session to disk with restricted permissions (0600).
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Removes the persisted session. Returns true if one existed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove session at {}", self.path.display()))?;
        Ok(true)
    }
}
