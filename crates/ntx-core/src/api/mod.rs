//! HTTP client for the remote notes service.
//!
//! The service exposes credential endpoints (`/auth/register`, `/auth/token`)
//! and a bearer-authenticated notes collection (`/notes`). All calls are
//! plain request/response; there is no streaming.

mod client;
mod errors;
mod types;

pub use client::NotesApi;
pub use errors::{ApiError, ApiErrorKind};
pub use types::{Note, NoteDraft, User};
