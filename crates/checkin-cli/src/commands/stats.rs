//! Stats and history commands

use anyhow::{Context, Result};
use checkin::prelude::*;

pub fn execute(terminal: &TerminalConfig, json: bool) -> Result<()> {
    let db = super::open_db(terminal)?;
    let stats = db.stats().context("Failed to read stats")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("\nEntered: {} / {}", stats.entered, stats.total);
    println!("{}", "=".repeat(60));
    if stats.recent_logs.is_empty() {
        println!("No log entries");
    }
    for entry in &stats.recent_logs {
        print_entry(entry);
    }
    Ok(())
}

pub fn history(terminal: &TerminalConfig, raw_id: &str) -> Result<()> {
    let db = super::open_db(terminal)?;
    let id = ParticipantId::normalize(raw_id);

    let Some(participant) = db.participant(&id).context("Failed to look up participant")? else {
        println!("{} is not registered", id);
        return Ok(());
    };

    println!("\nParticipant {} ({:?})", participant.id, participant.status);
    println!("{}", "=".repeat(60));
    for entry in db.history(&id).context("Failed to read history")? {
        print_entry(&entry);
    }
    Ok(())
}

fn print_entry(entry: &AccessLogEntry) {
    println!(
        "#{:<8} {} {} {:<12} {}",
        entry.id,
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.participant_id,
        entry.entry_type.as_str(),
        entry.event_name
    );
}
