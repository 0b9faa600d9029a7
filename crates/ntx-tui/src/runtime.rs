//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! Async work follows an inbox pattern: spawned tasks send their result
//! `AppEvent` to `inbox_tx`, and the loop drains `inbox_rx` each frame.

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use ntx_core::api::NotesApi;
use ntx_core::session::{Session, SessionStore};

use crate::effects::UiEffect;
use crate::events::{AppEvent, MutationKind};
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll duration for terminal events. Input wakes the loop immediately; the
/// timeout only bounds how long async results wait in the inbox.
const POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

type EventSender = mpsc::UnboundedSender<AppEvent>;
type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop and on
/// panic via the hook installed in `new`.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    api: NotesApi,
    store: SessionStore,
    inbox_tx: EventSender,
    inbox_rx: EventReceiver,
}

impl TuiRuntime {
    /// Creates a new runtime and enters the alternate screen.
    ///
    /// Must be called from within a tokio runtime; effect execution spawns
    /// tasks on it.
    pub fn new(api: NotesApi, store: SessionStore, session: Option<Session>) -> Result<Self> {
        // Set up the panic hook BEFORE entering the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(session);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            api,
            store,
            inbox_tx,
            inbox_rx,
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        // A held session is provisional: refresh immediately so a stale
        // token drops the gate back to the auth view.
        if self.state.session.is_some() {
            let effects = update::start_refresh(&mut self.state);
            self.execute_effects(effects);
        }

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            self.terminal.draw(|frame| {
                render::render(&self.state, frame);
            })?;
        }

        Ok(())
    }

    /// Collects pending events: async results from the inbox, then terminal
    /// input. Blocks up to `POLL_DURATION` when both are empty.
    fn collect_events(&mut self) -> Result<Vec<AppEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            POLL_DURATION
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(AppEvent::Terminal(event::read()?));
            // Drain any remaining buffered input without blocking.
            while event::poll(std::time::Duration::ZERO)? {
                events.push(AppEvent::Terminal(event::read()?));
            }
        }

        if events.is_empty() {
            events.push(AppEvent::Tick);
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async effect whose result event lands in the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }

            UiEffect::SpawnLogin { email, password } => {
                let api = self.api.clone();
                self.spawn_effect(move || async move {
                    let result = api
                        .login(&email, &password)
                        .await
                        .map_err(|e| e.to_string());
                    AppEvent::AuthCompleted(result)
                });
            }

            UiEffect::SpawnRegister { email, password } => {
                let api = self.api.clone();
                self.spawn_effect(move || async move {
                    // Registration is followed by sign-in with the same
                    // credentials, so the user lands in the notes view.
                    let result = match api.register(&email, &password).await {
                        Ok(_) => api.login(&email, &password).await,
                        Err(e) => Err(e),
                    };
                    AppEvent::AuthCompleted(result.map_err(|e| e.to_string()))
                });
            }

            UiEffect::SpawnListNotes { seq } => {
                let Some(session) = self.state.session.clone() else {
                    return;
                };
                let api = self.api.clone();
                self.spawn_effect(move || async move {
                    let result = api.list_notes(&session).await;
                    AppEvent::NotesListed { seq, result }
                });
            }

            UiEffect::SpawnCreateNote { title, content } => {
                let Some(session) = self.state.session.clone() else {
                    return;
                };
                let api = self.api.clone();
                self.spawn_effect(move || async move {
                    let draft = ntx_core::api::NoteDraft { title, content };
                    let result = api.create_note(&session, &draft).await.map(|_| ());
                    AppEvent::NoteMutated {
                        kind: MutationKind::Create,
                        result,
                    }
                });
            }

            UiEffect::SpawnDeleteNote { id } => {
                let Some(session) = self.state.session.clone() else {
                    return;
                };
                let api = self.api.clone();
                self.spawn_effect(move || async move {
                    let result = api.delete_note(&session, id).await;
                    AppEvent::NoteMutated {
                        kind: MutationKind::Delete,
                        result,
                    }
                });
            }

            UiEffect::PersistSession => {
                if let Some(session) = &self.state.session {
                    if let Err(e) = self.store.save(session) {
                        tracing::warn!("failed to persist session: {e:#}");
                        self.state.notes.status = Some("Could not save session".to_string());
                    }
                }
            }

            UiEffect::ClearSession => {
                if let Err(e) = self.store.clear() {
                    tracing::warn!("failed to clear session: {e:#}");
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
