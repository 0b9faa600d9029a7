//! Auth command handlers.

use anyhow::{Context, Result};
use ntx_core::api::NotesApi;
use ntx_core::config::Config;
use ntx_core::session::SessionStore;

use super::{require_session, surface_error};

/// Registers a new account, then signs in with the same credentials.
pub async fn register(config: &Config, email: &str, password: &str) -> Result<()> {
    let api = NotesApi::from_config(config)?;

    let user = api.register(email, password).await?;
    println!("Registered {}", user.email);

    let session = api.login(email, password).await?;
    SessionStore::open_default()
        .save(&session)
        .context("save session")?;
    println!("Signed in as {}", user.email);
    Ok(())
}

pub async fn login(config: &Config, email: &str, password: &str) -> Result<()> {
    let api = NotesApi::from_config(config)?;

    let session = api.login(email, password).await?;
    SessionStore::open_default()
        .save(&session)
        .context("save session")?;
    println!("Signed in as {email}");
    Ok(())
}

pub fn logout() -> Result<()> {
    let store = SessionStore::open_default();
    if store.clear().context("clear session")? {
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

/// Shows the signed-in account by asking the service, which also verifies
/// the held token is still accepted.
pub async fn whoami(config: &Config) -> Result<()> {
    let (store, session) = require_session()?;
    let api = NotesApi::from_config(config)?;

    let user = api
        .me(&session)
        .await
        .map_err(|e| surface_error(&store, e))?;
    println!("Signed in as {} (id {})", user.email, user.id);
    println!("Token: {}", session.masked());
    Ok(())
}
