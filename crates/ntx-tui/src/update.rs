//! The reducer: all state mutations happen here.
//!
//! `update` consumes one event, mutates state, and returns the effects the
//! runtime should execute. It never performs I/O.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::{AppEvent, MutationKind};
use crate::state::{AppState, AuthForm, AuthMode, View};

/// Message shown on the auth form after the server rejects the held token.
const SESSION_EXPIRED_MSG: &str = "Session expired. Sign in again.";

pub fn update(state: &mut AppState, event: AppEvent) -> Vec<UiEffect> {
    match event {
        AppEvent::Tick => vec![],
        AppEvent::Terminal(ev) => handle_terminal(state, &ev),
        AppEvent::AuthCompleted(result) => handle_auth_completed(state, result),
        AppEvent::NotesListed { seq, result } => handle_notes_listed(state, seq, result),
        AppEvent::NoteMutated { kind, result } => handle_note_mutated(state, kind, result),
    }
}

fn handle_terminal(state: &mut AppState, event: &Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        return vec![];
    };
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    match state.view {
        View::Auth => handle_auth_key(state, *key),
        View::Notes => handle_notes_key(state, *key),
    }
}

// ============================================================================
// Auth view
// ============================================================================

fn handle_auth_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Tab => {
            state.auth.focus = state.auth.focus.next();
            vec![]
        }
        KeyCode::Char('t') if ctrl => {
            state.auth.mode = state.auth.mode.toggled();
            state.auth.error = None;
            vec![]
        }
        KeyCode::Enter => submit_credentials(state),
        KeyCode::Backspace => {
            state.auth.focused_value_mut().pop();
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            state.auth.focused_value_mut().push(c);
            vec![]
        }
        _ => vec![],
    }
}

fn submit_credentials(state: &mut AppState) -> Vec<UiEffect> {
    if state.auth.busy {
        return vec![];
    }

    state.auth.busy = true;
    state.auth.error = None;

    let email = state.auth.email.trim().to_string();
    let password = state.auth.password.clone();

    match state.auth.mode {
        AuthMode::SignIn => vec![UiEffect::SpawnLogin { email, password }],
        AuthMode::Register => vec![UiEffect::SpawnRegister { email, password }],
    }
}

// ============================================================================
// Notes view
// ============================================================================

fn handle_notes_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if state.notes.draft.active {
        return handle_draft_key(state, key);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('n') => {
            state.notes.draft.open();
            vec![]
        }
        KeyCode::Char('r') => start_refresh(state),
        KeyCode::Char('d') | KeyCode::Delete => match state.notes.selected_note() {
            Some(note) => vec![UiEffect::SpawnDeleteNote { id: note.id }],
            None => vec![],
        },
        KeyCode::Char('j') | KeyCode::Down => {
            state.notes.move_selection(1);
            vec![]
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.notes.move_selection(-1);
            vec![]
        }
        KeyCode::Char('L') => {
            state.session = None;
            state.view = View::Auth;
            state.auth = AuthForm::new();
            state.notes = Default::default();
            vec![UiEffect::ClearSession]
        }
        _ => vec![],
    }
}

fn handle_draft_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            state.notes.draft.close();
            vec![]
        }
        KeyCode::Tab => {
            state.notes.draft.focus = state.notes.draft.focus.next();
            vec![]
        }
        KeyCode::Enter => submit_draft(state),
        KeyCode::Backspace => {
            state.notes.draft.focused_value_mut().pop();
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            state.notes.draft.focused_value_mut().push(c);
            vec![]
        }
        _ => vec![],
    }
}

/// Submits the draft. A whitespace-only title closes the form without a
/// network call and without a message, matching the service's original
/// client behavior.
fn submit_draft(state: &mut AppState) -> Vec<UiEffect> {
    let title = state.notes.draft.title.trim().to_string();
    let content = state.notes.draft.content.trim().to_string();
    state.notes.draft.close();

    if title.is_empty() {
        return vec![];
    }

    let content = if content.is_empty() {
        None
    } else {
        Some(content)
    };
    vec![UiEffect::SpawnCreateNote { title, content }]
}

/// Issues a new list refresh with the next sequence number.
pub fn start_refresh(state: &mut AppState) -> Vec<UiEffect> {
    let seq = state.next_list_seq();
    state.notes.loading = true;
    vec![UiEffect::SpawnListNotes { seq }]
}

// ============================================================================
// Async results
// ============================================================================

fn handle_auth_completed(
    state: &mut AppState,
    result: Result<ntx_core::session::Session, String>,
) -> Vec<UiEffect> {
    match result {
        Ok(session) => {
            state.session = Some(session);
            state.view = View::Notes;
            state.auth = AuthForm::new();
            let mut effects = vec![UiEffect::PersistSession];
            effects.extend(start_refresh(state));
            effects
        }
        Err(message) => {
            state.auth.busy = false;
            state.auth.error = Some(message);
            vec![]
        }
    }
}

fn handle_notes_listed(
    state: &mut AppState,
    seq: u64,
    result: Result<Vec<ntx_core::api::Note>, ntx_core::api::ApiError>,
) -> Vec<UiEffect> {
    if !state.is_latest_list(seq) {
        // A newer refresh is in flight; this result is stale.
        return vec![];
    }

    state.notes.loading = false;
    match result {
        Ok(notes) => {
            state.notes.set_notes(notes);
            state.notes.status = None;
            vec![]
        }
        Err(e) if e.is_auth_expired() => {
            state.expire_session(SESSION_EXPIRED_MSG);
            vec![UiEffect::ClearSession]
        }
        Err(e) => {
            state.notes.status = Some(format!("Refresh failed: {e}"));
            vec![]
        }
    }
}

fn handle_note_mutated(
    state: &mut AppState,
    kind: MutationKind,
    result: Result<(), ntx_core::api::ApiError>,
) -> Vec<UiEffect> {
    match result {
        Ok(()) => {
            state.notes.status = None;
            start_refresh(state)
        }
        Err(e) if e.is_auth_expired() => {
            state.expire_session(SESSION_EXPIRED_MSG);
            vec![UiEffect::ClearSession]
        }
        Err(e) => {
            state.notes.status = Some(format!("{} failed: {e}", kind.label()));
            vec![]
        }
    }
}
