//! Events consumed by the reducer.
//!
//! Terminal input and completed async work arrive through the same queue so
//! the reducer is the only place state changes.

use ntx_core::api::{ApiError, Note};
use ntx_core::session::Session;

/// Which mutation an async task performed, for status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Delete,
}

impl MutationKind {
    pub fn label(self) -> &'static str {
        match self {
            MutationKind::Create => "Create",
            MutationKind::Delete => "Delete",
        }
    }
}

/// Events processed by the reducer each frame.
#[derive(Debug)]
pub enum AppEvent {
    /// Periodic tick (animation/polling; currently unused by the reducer).
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// Credential exchange finished (login, or register followed by login).
    AuthCompleted(Result<Session, String>),
    /// A list refresh finished. `seq` identifies which refresh this is; the
    /// reducer drops results from superseded refreshes.
    NotesListed {
        seq: u64,
        result: Result<Vec<Note>, ApiError>,
    },
    /// A create/delete finished; success triggers a refresh.
    NoteMutated {
        kind: MutationKind,
        result: Result<(), ApiError>,
    },
}
