//! Append-only access log queries.

use crate::db_err;
use checkin_core::error::{CheckinError, Result};
use checkin_core::{AccessLogEntry, EntryType, ParticipantId};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

const SELECT_COLUMNS: &str = "SELECT id, participant_id, timestamp, type, event_name FROM access_logs";

/// Stored text form of a log timestamp
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<AccessLogEntry> {
    let timestamp: String = row.get(2)?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    let entry_type: String = row.get(3)?;
    let entry_type = EntryType::parse(&entry_type).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Text,
            format!("unknown entry type: {}", entry_type).into(),
        )
    })?;

    Ok(AccessLogEntry {
        id: row.get(0)?,
        participant_id: ParticipantId::from_stored(row.get(1)?),
        timestamp,
        entry_type,
        event_name: row.get(4)?,
    })
}

/// Append one entry and return it with its assigned sequence number
pub fn append(
    conn: &Connection,
    participant_id: &ParticipantId,
    entry_type: EntryType,
    event_name: &str,
    timestamp: DateTime<Utc>,
) -> Result<AccessLogEntry> {
    conn.prepare_cached(
        "INSERT INTO access_logs (participant_id, timestamp, type, event_name)
         VALUES (?1, ?2, ?3, ?4)",
    )
    .map_err(db_err)?
    .execute(params![
        participant_id.as_str(),
        format_timestamp(&timestamp),
        entry_type.as_str(),
        event_name,
    ])
    .map_err(db_err)?;

    // Stored text is millisecond precision; hand back what a reader would see
    let timestamp = DateTime::parse_from_rfc3339(&format_timestamp(&timestamp))
        .map_err(|e| CheckinError::Store(e.to_string()))?
        .with_timezone(&Utc);

    Ok(AccessLogEntry {
        id: conn.last_insert_rowid(),
        participant_id: participant_id.clone(),
        timestamp,
        entry_type,
        event_name: event_name.to_string(),
    })
}

/// Newest entries first
pub fn recent(conn: &Connection, limit: usize) -> Result<Vec<AccessLogEntry>> {
    let mut stmt = conn
        .prepare_cached(&format!("{} ORDER BY id DESC LIMIT ?1", SELECT_COLUMNS))
        .map_err(db_err)?;
    let entries = stmt
        .query_map(params![limit as i64], entry_from_row)
        .map_err(db_err)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(db_err)?;
    Ok(entries)
}

/// Every entry for one participant, oldest first
pub fn for_participant(conn: &Connection, id: &ParticipantId) -> Result<Vec<AccessLogEntry>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "{} WHERE participant_id = ?1 ORDER BY id ASC",
            SELECT_COLUMNS
        ))
        .map_err(db_err)?;
    let entries = stmt
        .query_map(params![id.as_str()], entry_from_row)
        .map_err(db_err)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(db_err)?;
    Ok(entries)
}

/// Visit every entry in insertion order without loading the log into memory.
///
/// Rows are pulled one at a time from a single statement, so the visitor
/// sees one consistent snapshot. Returns the number of rows visited.
pub fn for_each<F>(conn: &Connection, mut visit: F) -> Result<u64>
where
    F: FnMut(AccessLogEntry) -> Result<()>,
{
    let mut stmt = conn
        .prepare(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))
        .map_err(db_err)?;
    let mut rows = stmt.query([]).map_err(db_err)?;
    let mut visited = 0u64;
    while let Some(row) = rows.next().map_err(db_err)? {
        visit(entry_from_row(row).map_err(db_err)?)?;
        visited += 1;
    }
    Ok(visited)
}

pub fn count(conn: &Connection) -> Result<u64> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM access_logs", [], |row| row.get(0))
        .map_err(db_err)?;
    Ok(count as u64)
}

pub fn delete_all(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM access_logs", []).map_err(db_err)
}
