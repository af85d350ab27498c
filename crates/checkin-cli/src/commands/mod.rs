pub mod export;
pub mod maintenance;
pub mod scan;
pub mod stats;
pub mod status;

use anyhow::{Context, Result};
use checkin::prelude::*;
use std::io::{self, Write};
use std::path::Path;

/// Terminal config from `--config`, or defaults for `{db_path}/entry.db`
pub fn load_config(db_path: &Path, config: Option<&Path>) -> Result<TerminalConfig> {
    match config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let cfg: TerminalConfig = serde_json::from_str(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            Ok(cfg)
        }
        None => Ok(TerminalConfig {
            store: StoreConfig::in_dir(db_path),
            scan: ScanConfig::default(),
        }),
    }
}

pub fn open_db(terminal: &TerminalConfig) -> Result<CheckinDb> {
    CheckinDb::open_with_config(terminal.store.clone()).context("Failed to open database")
}

/// Checkpoint and release the store after a command that wrote to it
pub fn close_db(db: CheckinDb) -> Result<()> {
    db.close().context("Failed to close database")
}

/// Ask a yes/no question; anything but y/yes is a no
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("⚠️  WARNING: {}\nContinue? [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
