//! Status and open-folder commands

use anyhow::{Context, Result};
use checkin::prelude::*;
use std::path::Path;
use std::process::Command;

pub fn execute(terminal: &TerminalConfig) -> Result<()> {
    tracing::info!("Checking store status: {}", terminal.store.path.display());

    let db = super::open_db(terminal)?;
    let store = db.store();

    println!("\nStore Status");
    println!("{}", "=".repeat(60));
    println!("Path: {}", db.path().display());
    println!(
        "Schema Version: {}",
        store.schema_version().context("Failed to get schema version")?
    );
    println!(
        "Journal Mode: {}",
        store.journal_mode().context("Failed to get journal mode")?
    );
    println!("Synchronous: {}", store.config().synchronous.pragma_value());
    println!("Busy Timeout: {}ms", store.config().busy_timeout_ms);

    let stats = db.stats().context("Failed to read stats")?;
    println!("\nParticipants: {}", stats.total);
    println!("Entered: {}", stats.entered);
    println!("Log Entries: {}", db.log_count().context("Failed to count log")?);
    Ok(())
}

pub fn open_folder(terminal: &TerminalConfig) -> Result<()> {
    let db = super::open_db(terminal)?;
    let folder = db
        .data_folder()
        .canonicalize()
        .unwrap_or_else(|_| db.data_folder().to_path_buf());

    if launch(platform_opener(), &folder) {
        println!("Opened {}", folder.display());
    } else {
        println!("{}", folder.display());
    }
    Ok(())
}

fn platform_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

/// Run the file browser and wait for it to hand off. False if it failed.
fn launch(opener: &str, folder: &Path) -> bool {
    match Command::new(opener).arg(folder).status() {
        // explorer exits non-zero even when the window opened
        Ok(status) if status.success() || opener == "explorer" => {
            tracing::info!(opener, folder = %folder.display(), "Opened data folder");
            true
        }
        Ok(status) => {
            tracing::warn!(opener, %status, "File browser exited with failure");
            false
        }
        Err(e) => {
            tracing::warn!(opener, error = %e, "Could not launch file browser");
            false
        }
    }
}
