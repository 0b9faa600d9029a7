//! Full-screen TUI for the NTX notes client.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;

use ntx_core::api::NotesApi;
use ntx_core::config::Config;
use ntx_core::session::SessionStore;

/// Runs the interactive notes UI.
///
/// Loads the persisted session (if any) to decide the initial view, then
/// hands control to the runtime until the user quits.
pub async fn run(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `ntx list`, `ntx add`, etc. for non-interactive use."
        );
    }

    let api = NotesApi::from_config(config)?;
    let store = SessionStore::open_default();

    // An unreadable session file is treated as signed out, not fatal.
    let session = match store.load() {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("ignoring unreadable session file: {e:#}");
            None
        }
    };

    let mut runtime = TuiRuntime::new(api, store, session)?;
    runtime.run()?;

    // Terminal is restored by the runtime's Drop before this prints.
    drop(runtime);
    println!("Goodbye!");

    Ok(())
}
