//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations), which
//! keeps the reducer pure: it mutates state and returns effects, never
//! performs I/O or spawns tasks itself.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Spawn an async sign-in with the given credentials.
    SpawnLogin { email: String, password: String },

    /// Spawn an async registration; success is followed automatically by
    /// sign-in with the same credentials.
    SpawnRegister { email: String, password: String },

    /// Spawn a list refresh tagged with its sequence number.
    SpawnListNotes { seq: u64 },

    /// Spawn a note creation.
    SpawnCreateNote {
        title: String,
        content: Option<String>,
    },

    /// Spawn a note deletion.
    SpawnDeleteNote { id: i64 },

    /// Persist the current session to the store.
    PersistSession,

    /// Remove the persisted session from the store.
    ClearSession,
}
