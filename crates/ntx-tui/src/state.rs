//! Application state for the notes TUI.
//!
//! The state tree is deliberately flat:
//!
//! ```text
//! AppState
//! ├── view: View            (the auth gate: Auth or Notes)
//! ├── auth: AuthForm        (credential form state)
//! ├── notes: NotesPane      (fetched notes, selection, draft, status)
//! ├── session: Option<Session>
//! └── list_seq              (monotonic refresh sequence)
//! ```
//!
//! The notes view is rendered if and only if a session is held; the session
//! is provisional until the first authenticated call confirms the server
//! still accepts the token.

use ntx_core::api::Note;
use ntx_core::session::Session;

/// The view gate: which top-level screen is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Credential form (no accepted session).
    Auth,
    /// Notes list (session held, possibly not yet verified).
    Notes,
}

/// Whether the auth form submits a sign-in or a registration.
///
/// Registration is automatically followed by sign-in on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::Register,
            AuthMode::Register => AuthMode::SignIn,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign in",
            AuthMode::Register => "Register",
        }
    }
}

/// Which auth form field has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

impl AuthField {
    pub fn next(self) -> Self {
        match self {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        }
    }
}

/// Credential form state.
#[derive(Debug)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub focus: AuthField,
    /// Error message from the last failed exchange (if any).
    pub error: Option<String>,
    /// True while a credential exchange is in flight.
    pub busy: bool,
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::SignIn,
            email: String::new(),
            password: String::new(),
            focus: AuthField::Email,
            error: None,
            busy: false,
        }
    }

    /// A fresh form carrying an explanatory message, used when the gate
    /// drops back to the auth view after an expired session.
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::new()
        }
    }

    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Which draft field has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Content,
}

impl DraftField {
    pub fn next(self) -> Self {
        match self {
            DraftField::Title => DraftField::Content,
            DraftField::Content => DraftField::Title,
        }
    }
}

/// New-note draft form, shown as a popup over the list.
#[derive(Debug, Default)]
pub struct NoteDraftForm {
    pub active: bool,
    pub title: String,
    pub content: String,
    pub focus: DraftField,
}

impl Default for DraftField {
    fn default() -> Self {
        DraftField::Title
    }
}

impl NoteDraftForm {
    pub fn open(&mut self) {
        *self = Self {
            active: true,
            ..Self::default()
        };
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            DraftField::Title => &mut self.title,
            DraftField::Content => &mut self.content,
        }
    }
}

/// Notes list state: the read-through copy of the server collection.
///
/// The copy never persists across refreshes; every mutation triggers a full
/// re-fetch and `set_notes` replaces the whole vector.
#[derive(Debug, Default)]
pub struct NotesPane {
    pub notes: Vec<Note>,
    pub selected: usize,
    /// True while a list refresh is in flight.
    pub loading: bool,
    /// One-line status/error message shown under the list.
    pub status: Option<String>,
    pub draft: NoteDraftForm,
}

impl NotesPane {
    /// Replaces the displayed collection, keeping the selection in bounds.
    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.notes = notes;
        if self.selected >= self.notes.len() {
            self.selected = self.notes.len().saturating_sub(1);
        }
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.notes.get(self.selected)
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.notes.is_empty() {
            self.selected = 0;
            return;
        }
        let max = self.notes.len() - 1;
        let next = self.selected.saturating_add_signed(delta);
        self.selected = next.min(max);
    }
}

/// Top-level TUI state.
pub struct AppState {
    pub should_quit: bool,
    pub view: View,
    pub auth: AuthForm,
    pub notes: NotesPane,
    pub session: Option<Session>,
    list_seq: u64,
}

impl AppState {
    /// Creates the initial state; the gate opens on the notes view iff a
    /// persisted session exists.
    pub fn new(session: Option<Session>) -> Self {
        let view = if session.is_some() {
            View::Notes
        } else {
            View::Auth
        };
        Self {
            should_quit: false,
            view,
            auth: AuthForm::new(),
            notes: NotesPane::default(),
            session,
            list_seq: 0,
        }
    }

    /// Issues the next refresh sequence number.
    pub fn next_list_seq(&mut self) -> u64 {
        self.list_seq += 1;
        self.list_seq
    }

    /// True if `seq` is the most recently issued refresh. Responses from
    /// older refreshes are dropped so a slow request can never overwrite a
    /// newer result.
    pub fn is_latest_list(&self, seq: u64) -> bool {
        seq == self.list_seq
    }

    /// Drops the gate back to the auth view after the server rejected the
    /// held token. The caller also clears the persisted session.
    pub fn expire_session(&mut self, message: impl Into<String>) {
        self.session = None;
        self.view = View::Auth;
        self.auth = AuthForm::with_error(message);
        self.notes = NotesPane::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, title: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: None,
        }
    }

    /// Gate: initial view follows session presence.
    #[test]
    fn test_initial_view_gated_on_session() {
        assert_eq!(AppState::new(None).view, View::Auth);
        assert_eq!(
            AppState::new(Some(Session::new("tok"))).view,
            View::Notes
        );
    }

    /// Selection stays in bounds when the collection shrinks.
    #[test]
    fn test_set_notes_clamps_selection() {
        let mut pane = NotesPane::default();
        pane.set_notes(vec![note(1, "a"), note(2, "b"), note(3, "c")]);
        pane.selected = 2;

        pane.set_notes(vec![note(1, "a")]);
        assert_eq!(pane.selected, 0);

        pane.set_notes(vec![]);
        assert_eq!(pane.selected, 0);
    }

    /// Selection movement clamps at both ends.
    #[test]
    fn test_move_selection_clamps() {
        let mut pane = NotesPane::default();
        pane.set_notes(vec![note(1, "a"), note(2, "b")]);

        pane.move_selection(-1);
        assert_eq!(pane.selected, 0);

        pane.move_selection(1);
        pane.move_selection(1);
        assert_eq!(pane.selected, 1);
    }

    /// Only the most recently issued sequence is latest.
    #[test]
    fn test_list_seq_staleness() {
        let mut state = AppState::new(Some(Session::new("tok")));
        let first = state.next_list_seq();
        let second = state.next_list_seq();

        assert!(!state.is_latest_list(first));
        assert!(state.is_latest_list(second));
    }

    /// Expiry clears the session, resets the pane and carries a message.
    #[test]
    fn test_expire_session() {
        let mut state = AppState::new(Some(Session::new("tok")));
        state.notes.set_notes(vec![note(1, "a")]);

        state.expire_session("Session expired. Sign in again.");

        assert_eq!(state.view, View::Auth);
        assert!(state.session.is_none());
        assert!(state.notes.notes.is_empty());
        assert_eq!(
            state.auth.error.as_deref(),
            Some("Session expired. Sign in again.")
        );
    }
}
