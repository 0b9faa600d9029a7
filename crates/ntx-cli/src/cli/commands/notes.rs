//! Note command handlers.

use anyhow::Result;
use comfy_table::{Table, presets};
use ntx_core::api::{Note, NoteDraft, NotesApi};
use ntx_core::config::Config;

use super::{require_session, surface_error};

pub async fn list(config: &Config) -> Result<()> {
    let (store, session) = require_session()?;
    let api = NotesApi::from_config(config)?;

    let notes = api
        .list_notes(&session)
        .await
        .map_err(|e| surface_error(&store, e))?;

    if notes.is_empty() {
        println!("No notes. Create one with `ntx add <title>`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_header(vec!["ID", "Title", "Content"]);
    for note in &notes {
        table.add_row(vec![
            note.id.to_string(),
            note.title.clone(),
            preview(note.content_or_empty()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn add(config: &Config, title: &str, content: Option<String>) -> Result<()> {
    let (store, session) = require_session()?;
    let api = NotesApi::from_config(config)?;

    let draft = NoteDraft::new(title, content);
    let note = api
        .create_note(&session, &draft)
        .await
        .map_err(|e| surface_error(&store, e))?;
    println!("Created note {} ({})", note.id, note.title);
    Ok(())
}

pub async fn show(config: &Config, id: i64) -> Result<()> {
    let (store, session) = require_session()?;
    let api = NotesApi::from_config(config)?;

    let note = api
        .get_note(&session, id)
        .await
        .map_err(|e| surface_error(&store, e))?;
    print_note(&note);
    Ok(())
}

/// Edits a note. Omitted fields keep their current value, so the existing
/// note is fetched first.
pub async fn edit(
    config: &Config,
    id: i64,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    if title.is_none() && content.is_none() {
        anyhow::bail!("Nothing to change. Pass --title and/or --content.");
    }

    let (store, session) = require_session()?;
    let api = NotesApi::from_config(config)?;

    let current = api
        .get_note(&session, id)
        .await
        .map_err(|e| surface_error(&store, e))?;

    let draft = NoteDraft::new(
        title.unwrap_or(current.title),
        content.or(current.content),
    );
    let note = api
        .update_note(&session, id, &draft)
        .await
        .map_err(|e| surface_error(&store, e))?;
    println!("Updated note {} ({})", note.id, note.title);
    Ok(())
}

pub async fn rm(config: &Config, id: i64) -> Result<()> {
    let (store, session) = require_session()?;
    let api = NotesApi::from_config(config)?;

    api.delete_note(&session, id)
        .await
        .map_err(|e| surface_error(&store, e))?;
    println!("Deleted note {id}");
    Ok(())
}

fn print_note(note: &Note) {
    println!("#{} {}", note.id, note.title);
    let content = note.content_or_empty();
    if !content.is_empty() {
        println!();
        println!("{content}");
    }
}

/// First line of the content, shortened for the list table.
fn preview(content: &str) -> String {
    const MAX: usize = 40;
    let first_line = content.lines().next().unwrap_or("");
    if first_line.chars().count() <= MAX {
        return first_line.to_string();
    }
    let truncated: String = first_line.chars().take(MAX).collect();
    format!("{truncated}…")
}
