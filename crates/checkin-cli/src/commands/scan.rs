//! Scan command implementation

use crate::ScanArgs;
use anyhow::Result;
use checkin::prelude::*;
use std::io::{self, BufRead};

pub fn execute(
    terminal: &TerminalConfig,
    payloads: Vec<String>,
    args: &ScanArgs,
    json: bool,
) -> Result<()> {
    let db = super::open_db(terminal)?;
    let policy = apply_args(terminal.scan.clone(), args);
    tracing::debug!(?policy, "Scan policy");

    if payloads.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                continue;
            }
            report(&db, line, &policy, json)?;
        }
    } else {
        for payload in &payloads {
            report(&db, payload, &policy, json)?;
        }
    }
    super::close_db(db)
}

fn apply_args(mut policy: ScanConfig, args: &ScanArgs) -> ScanConfig {
    if let Some(event) = &args.event {
        policy = policy.with_event_name(event.clone());
    }
    if args.no_re_entry {
        policy = policy.with_re_entry(false);
    }
    if let Some(min_id) = args.min_id {
        policy = policy.with_min_id(min_id);
    }
    policy
}

/// Print one outcome. A store fault is shown and the loop keeps going.
fn report(db: &CheckinDb, payload: &str, policy: &ScanConfig, json: bool) -> Result<()> {
    match db.scan(payload, policy) {
        Ok(outcome) if json => println!("{}", serde_json::to_string(&outcome)?),
        Ok(outcome) => {
            let mark = if outcome.is_admitted() { "✓" } else { "✗" };
            println!("{} {:<18} ID: {}", mark, outcome.message(), outcome.id());
        }
        Err(err) => {
            tracing::error!(payload, error = %err, "Scan failed");
            println!("✗ {}", err.user_message());
        }
    }
    Ok(())
}
