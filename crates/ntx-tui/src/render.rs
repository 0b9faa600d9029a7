//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! frame, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use ntx_core::markup;

use crate::state::{AppState, AuthField, AuthForm, DraftField, NotesPane, View};

/// Height of the help line at the bottom of each view.
const HELP_HEIGHT: u16 = 1;

/// Height of the status line under the notes list.
const STATUS_HEIGHT: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(state: &AppState, frame: &mut Frame) {
    match state.view {
        View::Auth => render_auth(&state.auth, frame),
        View::Notes => render_notes(&state.notes, frame),
    }
}

// ============================================================================
// Auth view
// ============================================================================

fn render_auth(auth: &AuthForm, frame: &mut Frame) {
    let area = frame.area();
    let card = centered_rect(50, 9, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", auth.mode.title()));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // email
            Constraint::Length(1), // password
            Constraint::Length(1), // spacer
            Constraint::Length(1), // error / busy line
        ])
        .split(inner);

    frame.render_widget(
        field_line("Email", &auth.email, auth.focus == AuthField::Email),
        rows[0],
    );
    let masked = "*".repeat(auth.password.chars().count());
    frame.render_widget(
        field_line("Password", &masked, auth.focus == AuthField::Password),
        rows[1],
    );

    if auth.busy {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Working...",
                Style::default().fg(Color::DarkGray),
            )),
            rows[3],
        );
    } else if let Some(error) = &auth.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            )),
            rows[3],
        );
    }

    let help = Line::from(Span::styled(
        "Enter submit · Tab switch field · Ctrl+T sign in/register · Esc quit",
        Style::default().fg(Color::DarkGray),
    ));
    let help_area = Rect {
        x: area.x,
        y: area.bottom().saturating_sub(HELP_HEIGHT),
        width: area.width,
        height: HELP_HEIGHT,
    };
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), help_area);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Paragraph<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = if focused { "█" } else { "" };
    Paragraph::new(Line::from(vec![
        Span::styled(format!("{label:>9}: "), label_style),
        Span::raw(value),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
}

// ============================================================================
// Notes view
// ============================================================================

fn render_notes(notes: &NotesPane, frame: &mut Frame) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(HELP_HEIGHT),
        ])
        .split(area);

    render_note_list(notes, frame, rows[0]);
    render_status_line(notes, frame, rows[1]);

    let help = Line::from(Span::styled(
        "n new · d delete · r refresh · j/k move · L sign out · q quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(help), rows[2]);

    if notes.draft.active {
        render_draft_popup(notes, frame, area);
    }
}

fn render_note_list(notes: &NotesPane, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Notes ");

    if notes.notes.is_empty() {
        let text = if notes.loading {
            "Loading..."
        } else {
            "No notes yet. Press n to create one."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem<'_>> = notes.notes.iter().map(|n| note_item(n)).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(notes.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Builds one list row. Note text passes through `markup::escape` so markup
/// metacharacters in user content display literally.
fn note_item(note: &ntx_core::api::Note) -> ListItem<'static> {
    let mut spans = vec![Span::raw(markup::escape(&note.title))];
    if let Some(content) = &note.content {
        if !content.is_empty() {
            spans.push(Span::styled(
                format!("  {}", markup::escape(content)),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    ListItem::new(Line::from(spans))
}

fn render_status_line(notes: &NotesPane, frame: &mut Frame, area: Rect) {
    let line = if notes.loading {
        Line::from(Span::styled(
            "Refreshing...",
            Style::default().fg(Color::DarkGray),
        ))
    } else if let Some(status) = &notes.status {
        Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::styled(
            format!("{} note(s)", notes.notes.len()),
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_draft_popup(notes: &NotesPane, frame: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 8, area);
    frame.render_widget(Clear, popup);

    let block = Block::default().borders(Borders::ALL).title(" New note ");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        field_line(
            "Title",
            &notes.draft.title,
            notes.draft.focus == DraftField::Title,
        ),
        rows[0],
    );
    frame.render_widget(
        field_line(
            "Content",
            &notes.draft.content,
            notes.draft.focus == DraftField::Content,
        ),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Enter save · Tab switch field · Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
        rows[3],
    );
}

/// A fixed-height rectangle centered in `area`, `percent_x` percent wide.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height: height.min(area.height),
    }
}
