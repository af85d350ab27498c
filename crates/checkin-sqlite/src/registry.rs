//! Participant registry queries.
//!
//! Functions take a plain `&Connection` so they run equally on the writer
//! inside a [`WriteTxn`](crate::WriteTxn) or on a pooled read connection.

use crate::db_err;
use checkin_core::error::{CheckinError, Result};
use checkin_core::{Participant, ParticipantId, ParticipantStatus};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

fn status_from_sql(idx: usize, value: String) -> rusqlite::Result<ParticipantStatus> {
    ParticipantStatus::parse(&value).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown participant status: {}", value).into(),
        )
    })
}

/// Current status, or `None` if the id is not registered
pub fn status(conn: &Connection, id: &ParticipantId) -> Result<Option<ParticipantStatus>> {
    conn.prepare_cached("SELECT status FROM participants WHERE id = ?1")
        .map_err(db_err)?
        .query_row(params![id.as_str()], |row| status_from_sql(0, row.get(0)?))
        .optional()
        .map_err(db_err)
}

pub fn get(conn: &Connection, id: &ParticipantId) -> Result<Option<Participant>> {
    Ok(status(conn, id)?.map(|status| Participant {
        id: id.clone(),
        status,
    }))
}

/// Conditionally move a participant from not-entered to entered.
///
/// Returns `false` if the row was already entered (or missing), which is
/// how a racing admission is detected without trusting an earlier read.
pub fn mark_entered(conn: &Connection, id: &ParticipantId) -> Result<bool> {
    let changed = conn
        .prepare_cached("UPDATE participants SET status = ?1 WHERE id = ?2 AND status = ?3")
        .map_err(db_err)?
        .execute(params![
            ParticipantStatus::Entered.as_str(),
            id.as_str(),
            ParticipantStatus::NotEntered.as_str(),
        ])
        .map_err(db_err)?;
    Ok(changed == 1)
}

/// Set every participant back to not-entered; ids are kept
pub fn reset_all_statuses(conn: &Connection) -> Result<usize> {
    conn.execute(
        "UPDATE participants SET status = ?1 WHERE status <> ?1",
        params![ParticipantStatus::NotEntered.as_str()],
    )
    .map_err(db_err)
}

pub fn delete_all(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM participants", []).map_err(db_err)
}

/// Insert one not-entered participant per integer in `start..=end`
pub fn insert_range(conn: &Connection, start: u64, end: u64) -> Result<u64> {
    if start > end {
        return Err(CheckinError::InvalidRange { start, end });
    }
    let mut stmt = conn
        .prepare_cached("INSERT INTO participants (id, status) VALUES (?1, ?2)")
        .map_err(db_err)?;
    let mut inserted = 0u64;
    for n in start..=end {
        let id = ParticipantId::from_number(n);
        stmt.execute(params![id.as_str(), ParticipantStatus::NotEntered.as_str()])
            .map_err(db_err)?;
        inserted += 1;
    }
    Ok(inserted)
}

pub fn count_total(conn: &Connection) -> Result<u64> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM participants", [], |row| row.get(0))
        .map_err(db_err)?;
    Ok(count as u64)
}

pub fn count_with_status(conn: &Connection, status: ParticipantStatus) -> Result<u64> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM participants WHERE status = ?1",
            params![status.as_str()],
            |row| row.get(0),
        )
        .map_err(db_err)?;
    Ok(count as u64)
}

/// All ids in ascending order
pub fn list_ids(conn: &Connection) -> Result<Vec<ParticipantId>> {
    let mut stmt = conn
        .prepare("SELECT id FROM participants ORDER BY id ASC")
        .map_err(db_err)?;
    let ids = stmt
        .query_map([], |row| row.get::<_, String>(0).map(ParticipantId::from_stored))
        .map_err(db_err)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(db_err)?;
    Ok(ids)
}
