//! Transcript CLI commands: list, show, delete.
//!
//! Reads the same folders the server writes, so an operator can browse or
//! prune an agent's saved calls without starting the API.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use stayon_core::transcript::codec;
use stayon_core::transcript::repository::TranscriptRepository;
use stayon_types::chat::TurnRole;
use stayon_types::transcript::{DeleteOutcome, TranscriptFormat};

/// Render the timestamp embedded in a filename, or `-` if it has none.
fn saved_at(filename: &str) -> String {
    codec::filename_timestamp(filename)
        .and_then(|ts| NaiveDateTime::parse_from_str(ts, codec::TIMESTAMP_FORMAT).ok())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// List an agent's transcripts, newest first.
///
/// ```bash
/// stayon transcripts list --user kim_1234
/// stayon transcripts list --user kim_1234 --search hong --json
/// ```
pub async fn list_transcripts<R: TranscriptRepository>(
    store: &R,
    user: &str,
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut files = store
        .list(user)
        .await
        .with_context(|| format!("failed to list transcripts for '{user}'"))?;
    if let Some(keyword) = search {
        files = codec::search(&files, keyword);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }

    if files.is_empty() {
        println!();
        println!(
            "  {} No transcripts found for '{}'.",
            style("i").blue().bold(),
            style(user).cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("File").fg(Color::White),
        Cell::new("Customer").fg(Color::White),
        Cell::new("Saved").fg(Color::White),
    ]);

    for file in &files {
        table.add_row(vec![
            Cell::new(file),
            Cell::new(codec::customer_from_filename(file)).fg(Color::Cyan),
            Cell::new(saved_at(file)),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} transcript{}",
        style(files.len()).bold(),
        if files.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Print one transcript's metadata and conversation.
pub async fn show_transcript<R: TranscriptRepository>(
    store: &R,
    user: &str,
    file: &str,
    json: bool,
) -> Result<()> {
    let loaded = store
        .load(user, file)
        .await
        .with_context(|| format!("failed to load '{file}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&loaded)?);
        return Ok(());
    }

    let t = &loaded.transcript;
    let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

    println!();
    println!("  {}", style(&loaded.filename).bold());
    if loaded.format == TranscriptFormat::Legacy {
        println!("  {}", style("legacy format: no case metadata").yellow());
    }
    println!();
    println!("  Customer:  {}", style(or_dash(&t.customer_name)).cyan());
    println!("  Urgency:   {}", or_dash(&t.urgency_tier));
    println!("  Situation: {}", or_dash(&t.situation_text));
    if !t.emphasis_topics.is_empty() {
        println!("  Emphasis:  {}", t.emphasis_topics.join(", "));
    }
    println!();

    for turn in &t.messages {
        let label = match turn.role {
            TurnRole::Assistant => style("assistant").green().bold(),
            TurnRole::User => style("agent").blue().bold(),
        };
        println!("  {label}");
        for line in turn.content.lines() {
            println!("    {line}");
        }
        println!();
    }

    Ok(())
}

/// Delete a transcript, asking first unless `force` or `json` is set.
pub async fn delete_transcript<R: TranscriptRepository>(
    store: &R,
    user: &str,
    file: &str,
    force: bool,
    json: bool,
) -> Result<()> {
    codec::validate_filename(file)?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete transcript '{}'?", style(file).red().bold()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let outcome = store
        .delete(user, file)
        .await
        .with_context(|| format!("failed to delete '{file}'"))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "file": file,
                "outcome": outcome,
            }))?
        );
        return Ok(());
    }

    match outcome {
        DeleteOutcome::Deleted => {
            println!("  {} Deleted '{}'", style("✓").green().bold(), file);
        }
        DeleteOutcome::AlreadyDeleted => {
            println!("  {} '{}' was already deleted", style("i").blue().bold(), file);
        }
    }
    Ok(())
}
