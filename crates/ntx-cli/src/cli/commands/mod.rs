//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod notes;

use anyhow::{Result, anyhow, bail};
use ntx_core::api::ApiError;
use ntx_core::session::{Session, SessionStore};

/// Loads the persisted session, failing with a hint when signed out.
pub fn require_session() -> Result<(SessionStore, Session)> {
    let store = SessionStore::open_default();
    match store.load()? {
        Some(session) => Ok((store, session)),
        None => bail!("Not signed in. Run `ntx login <email>` first."),
    }
}

/// Converts an API failure into a command error.
///
/// A rejected token also discards the persisted session, so the next command
/// asks the user to sign in instead of failing the same way.
pub fn surface_error(store: &SessionStore, e: ApiError) -> anyhow::Error {
    if e.is_auth_expired() {
        if let Err(clear_err) = store.clear() {
            tracing::warn!("failed to clear session: {clear_err:#}");
        }
        return anyhow!("Session expired. Run `ntx login <email>` to sign in again.");
    }
    anyhow::Error::new(e)
}
