use crate::db_err;
use checkin_core::error::{CheckinError, Result};
use rusqlite::Connection;

/// Layout version recorded in `PRAGMA user_version`
pub const SCHEMA_VERSION: i64 = 1;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS participants (
        id TEXT PRIMARY KEY,
        status TEXT NOT NULL DEFAULT 'not_entered'
    );

    CREATE TABLE IF NOT EXISTS access_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        participant_id TEXT NOT NULL,
        timestamp TEXT NOT NULL,
        type TEXT NOT NULL,
        event_name TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_access_logs_participant_id
        ON access_logs(participant_id);
"#;

/// Create the registry and log tables if needed and stamp the layout version.
///
/// Runs inside an immediate transaction so two terminals starting at once
/// do not race on the version check.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("BEGIN IMMEDIATE").map_err(db_err)?;
    match apply(conn) {
        Ok(()) => {
            conn.execute_batch("COMMIT").map_err(db_err)?;
            Ok(())
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

fn apply(conn: &Connection) -> Result<()> {
    let current = schema_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(CheckinError::Config(format!(
            "Store schema version {} is newer than supported version {}",
            current, SCHEMA_VERSION
        )));
    }

    conn.execute_batch(SCHEMA).map_err(db_err)?;

    if current < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)
            .map_err(db_err)?;
        tracing::info!(from = current, to = SCHEMA_VERSION, "Stamped schema version");
    }
    Ok(())
}

/// Read the layout version; 0 for a fresh file
pub fn schema_version(conn: &Connection) -> Result<i64> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(db_err)
}
