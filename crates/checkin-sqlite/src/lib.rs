//! SQLite-backed participant registry and access log
//!
//! Key features:
//! - WAL mode with relaxed fsync for sustained scan throughput
//! - Idempotent schema bootstrap, safe on every process start
//! - `BEGIN IMMEDIATE` write transactions so terminals sharing one file
//!   serialize on SQLite's own lock
//! - A pool of read-only connections for polling, lookups and exports

pub mod access_log;
pub mod read_pool;
pub mod registry;
pub mod schema;
pub mod store;
pub mod txn;

pub use read_pool::{PooledSqliteConnection, SqliteReadPool};
pub use store::SqliteStore;
pub use txn::WriteTxn;

use checkin_core::CheckinError;
use rusqlite::ErrorCode;

/// Map a SQLite error into the check-in error taxonomy.
///
/// Busy and locked results (after the busy handler gave up) are kept apart
/// from other failures so callers can tell contention from breakage.
pub fn db_err(err: rusqlite::Error) -> CheckinError {
    match err.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => {
            CheckinError::Busy(err.to_string())
        }
        _ => CheckinError::Store(err.to_string()),
    }
}
