//! Destructive maintenance commands; both confirm unless --force

use anyhow::{Context, Result};

pub fn initialize(
    terminal: &checkin::TerminalConfig,
    start: u64,
    end: u64,
    force: bool,
) -> Result<()> {
    if start > end {
        anyhow::bail!("Start {} must not be greater than end {}", start, end);
    }

    if !force
        && !super::confirm(&format!(
            "Registering ids {}..={} deletes ALL participants and the entire access log.",
            start, end
        ))?
    {
        println!("Initialization cancelled");
        return Ok(());
    }

    let db = super::open_db(terminal)?;
    let count = db
        .initialize_ids(start, end)
        .context("Failed to initialize ids")?;
    println!("✓ Registered {} participants", count);
    super::close_db(db)
}

pub fn clear(terminal: &checkin::TerminalConfig, force: bool) -> Result<()> {
    if !force && !super::confirm("This permanently deletes the access log and resets every admission.")? {
        println!("Clear cancelled");
        return Ok(());
    }

    let db = super::open_db(terminal)?;
    let summary = db.clear_logs().context("Failed to clear logs")?;
    println!(
        "✓ Deleted {} log entries, reset {} participants",
        summary.logs_deleted, summary.participants_reset
    );
    if !summary.compacted {
        println!("Store compaction did not complete; it will be retried on the next clear");
    }
    super::close_db(db)
}
