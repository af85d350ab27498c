//! SQLite Read Connection Pool
//!
//! Provides a pool of read-only SQLite connections for concurrent reads.
//! Stats polling and exports go through here so they never queue behind
//! the writer connection.

use crate::db_err;
use checkin_core::{
    error::{CheckinError, Result},
    ReadPoolConfig,
};
use parking_lot::{Mutex, MutexGuard};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// How long to park on one slot before re-scanning the others
const PARK_SLICE: Duration = Duration::from_millis(10);

/// A pooled read-only connection, returned to the pool on drop
pub struct PooledSqliteConnection<'a> {
    conn: MutexGuard<'a, Connection>,
}

impl<'a> PooledSqliteConnection<'a> {
    /// Get direct access to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Manages a pool of read-only SQLite connections.
/// Each connection is opened with the `SQLITE_OPEN_READ_ONLY` flag.
pub struct SqliteReadPool {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
    acquire_timeout: Duration,
    enabled: bool,
}

impl SqliteReadPool {
    /// Opens `pool_size` read-only connections (one if pooling is disabled).
    ///
    /// The database file must already exist.
    pub fn new(db_path: &Path, config: &ReadPoolConfig, busy_timeout: Duration) -> Result<Self> {
        let pool_size = if config.enabled {
            config.pool_size.max(1)
        } else {
            1
        };
        let mut connections = Vec::with_capacity(pool_size);

        for _ in 0..pool_size {
            let conn = Connection::open_with_flags(
                db_path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(db_err)?;
            conn.busy_timeout(busy_timeout).map_err(db_err)?;
            connections.push(Mutex::new(conn));
        }

        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
            acquire_timeout: Duration::from_millis(config.acquire_timeout_ms),
            enabled: config.enabled,
        })
    }

    /// Acquire a pooled read-only connection
    ///
    /// Waits up to the configured timeout for a connection to become available.
    pub fn acquire(&self) -> Result<PooledSqliteConnection<'_>> {
        let deadline = Instant::now() + self.acquire_timeout;
        let start = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();

        loop {
            if let Some(conn) = self.scan_from(start) {
                return Ok(conn);
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(CheckinError::LockTimeout {
                    timeout_ms: self.acquire_timeout.as_millis() as u64,
                });
            }

            let wait = (deadline - now).min(PARK_SLICE);
            if let Some(guard) = self.connections[start].try_lock_for(wait) {
                return Ok(PooledSqliteConnection { conn: guard });
            }
        }
    }

    /// Try to acquire a pooled read-only connection without waiting
    ///
    /// Returns `None` if no connection is immediately available.
    pub fn try_acquire(&self) -> Option<PooledSqliteConnection<'_>> {
        let start = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        self.scan_from(start)
    }

    fn scan_from(&self, start: usize) -> Option<PooledSqliteConnection<'_>> {
        let len = self.connections.len();
        (0..len)
            .map(|offset| &self.connections[(start + offset) % len])
            .find_map(|slot| slot.try_lock())
            .map(|conn| PooledSqliteConnection { conn })
    }

    /// Check if pooling is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pool_size(&self) -> usize {
        self.connections.len()
    }
}
