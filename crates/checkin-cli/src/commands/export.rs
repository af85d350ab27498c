//! Export command implementation

use anyhow::{Context, Result};
use checkin::prelude::*;
use std::path::PathBuf;

pub fn execute(
    terminal: &TerminalConfig,
    output: Option<PathBuf>,
    bom: bool,
    columns: Option<&str>,
) -> Result<()> {
    let mut options = ExportOptions::default().with_bom(bom);
    if let Some(columns) = columns {
        options = options.with_columns(parse_columns(columns)?);
    }

    let db = super::open_db(terminal)?;
    match db
        .export_logs(output.as_deref(), &options)
        .context("Failed to export logs")?
    {
        Some(summary) => println!(
            "✓ Exported {} rows to {}",
            summary.rows,
            summary.path.display()
        ),
        None => println!("Export cancelled"),
    }
    Ok(())
}

fn parse_columns(list: &str) -> Result<Vec<ExportColumn>> {
    list.split(',')
        .filter(|name| !name.trim().is_empty())
        .map(|name| ExportColumn::parse(name).map_err(anyhow::Error::from))
        .collect()
}
