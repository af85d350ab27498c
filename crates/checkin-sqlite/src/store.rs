use checkin_core::{
    error::{CheckinError, Result},
    StoreConfig,
};
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

use crate::read_pool::{PooledSqliteConnection, SqliteReadPool};
use crate::txn::WriteTxn;
use crate::{db_err, schema};

/// SQLite-backed check-in store
///
/// One writer connection guarded by a lock with a bounded wait, plus a
/// pool of read-only connections. Several processes may open the same file;
/// SQLite's own locking serializes their write transactions.
pub struct SqliteStore {
    writer: Mutex<Connection>,
    read_pool: SqliteReadPool,
    config: StoreConfig,
}

impl SqliteStore {
    /// Open or create the store, tune it and ensure the schema exists.
    pub fn open(cfg: StoreConfig) -> Result<Self> {
        // Create parent directory if needed
        if let Some(parent) = cfg.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            &cfg.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(db_err)?;

        Self::configure_connection(&conn, &cfg)?;
        schema::init_schema(&conn)?;

        let read_pool = SqliteReadPool::new(&cfg.path, &cfg.read_pool, Self::busy_timeout(&cfg))?;

        tracing::info!(
            path = %cfg.path.display(),
            wal = cfg.wal_mode,
            synchronous = cfg.synchronous.pragma_value(),
            readers = read_pool.pool_size(),
            pooled = read_pool.is_enabled(),
            "Opened check-in store"
        );

        Ok(Self {
            writer: Mutex::new(conn),
            read_pool,
            config: cfg,
        })
    }

    fn busy_timeout(cfg: &StoreConfig) -> Duration {
        Duration::from_millis(cfg.busy_timeout_ms)
    }

    /// Configure SQLite connection
    fn configure_connection(conn: &Connection, cfg: &StoreConfig) -> Result<()> {
        // Busy handler first: switching journal mode needs the lock too
        conn.busy_timeout(Self::busy_timeout(cfg)).map_err(db_err)?;

        if cfg.wal_mode {
            let mode: String = conn
                .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
                .map_err(db_err)?;
            if !mode.eq_ignore_ascii_case("wal") {
                tracing::warn!(mode = %mode, "Store did not switch to WAL journal mode");
            }
        }

        conn.pragma_update(None, "synchronous", cfg.synchronous.pragma_value())
            .map_err(|e| CheckinError::Config(e.to_string()))?;

        conn.pragma_update(None, "cache_size", cfg.cache_size)
            .map_err(|e| CheckinError::Config(e.to_string()))?;

        Ok(())
    }

    /// Begin an immediate write transaction.
    ///
    /// Waits at most `busy_timeout_ms` for the in-process writer, then at
    /// most that long again for SQLite's lock.
    pub fn begin_write(&self) -> Result<WriteTxn<'_>> {
        let timeout = Self::busy_timeout(&self.config);
        let guard = self
            .writer
            .try_lock_for(timeout)
            .ok_or(CheckinError::LockTimeout {
                timeout_ms: self.config.busy_timeout_ms,
            })?;
        WriteTxn::begin(guard)
    }

    /// Acquire a read-only connection from the pool
    pub fn read(&self) -> Result<PooledSqliteConnection<'_>> {
        self.read_pool.acquire()
    }

    /// Rebuild the database file to reclaim free pages.
    ///
    /// Must not be called while a [`WriteTxn`] is open on this store.
    pub fn vacuum(&self) -> Result<()> {
        let guard = self
            .writer
            .try_lock_for(Self::busy_timeout(&self.config))
            .ok_or(CheckinError::LockTimeout {
                timeout_ms: self.config.busy_timeout_ms,
            })?;
        guard.execute_batch("VACUUM").map_err(db_err)?;
        Ok(())
    }

    /// Fold the write-ahead log back into the database file and truncate it.
    ///
    /// Returns false if a reader in another process kept the checkpoint from
    /// completing; the log is then left for a later checkpoint.
    pub fn checkpoint(&self) -> Result<bool> {
        let guard = self
            .writer
            .try_lock_for(Self::busy_timeout(&self.config))
            .ok_or(CheckinError::LockTimeout {
                timeout_ms: self.config.busy_timeout_ms,
            })?;
        let busy: i64 = guard
            .query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |row| row.get(0))
            .map_err(db_err)?;
        Ok(busy == 0)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Layout version stamped in the file
    pub fn schema_version(&self) -> Result<i64> {
        let conn = self.read()?;
        schema::schema_version(conn.connection())
    }

    /// Current journal mode as reported by SQLite, lowercased
    pub fn journal_mode(&self) -> Result<String> {
        let conn = self.read()?;
        let mode: String = conn
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .map_err(db_err)?;
        Ok(mode.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use checkin_core::{ParticipantId, ParticipantStatus};

    fn open_temp() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(StoreConfig::in_dir(dir.path())).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_creates_file_in_wal_mode() {
        let (dir, store) = open_temp();
        assert!(dir.path().join("entry.db").exists());
        assert_eq!(store.journal_mode().unwrap(), "wal");
        assert_eq!(store.schema_version().unwrap(), schema::SCHEMA_VERSION);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = SqliteStore::open(StoreConfig::in_dir(dir.path())).unwrap();
            let txn = store.begin_write().unwrap();
            registry::insert_range(txn.conn(), 1, 2).unwrap();
            txn.commit().unwrap();
        }
        let store = SqliteStore::open(StoreConfig::in_dir(dir.path())).unwrap();
        let conn = store.read().unwrap();
        assert_eq!(registry::count_total(conn.connection()).unwrap(), 2);
    }

    #[test]
    fn test_dropped_txn_rolls_back() {
        let (_dir, store) = open_temp();
        {
            let txn = store.begin_write().unwrap();
            registry::insert_range(txn.conn(), 1, 5).unwrap();
        }
        let conn = store.read().unwrap();
        assert_eq!(registry::count_total(conn.connection()).unwrap(), 0);
    }

    #[test]
    fn test_readers_see_committed_writes() {
        let (_dir, store) = open_temp();
        let txn = store.begin_write().unwrap();
        registry::insert_range(txn.conn(), 7, 7).unwrap();
        registry::mark_entered(txn.conn(), &ParticipantId::from_number(7)).unwrap();

        {
            let conn = store.read().unwrap();
            assert_eq!(registry::count_total(conn.connection()).unwrap(), 0);
        }

        txn.commit().unwrap();
        let conn = store.read().unwrap();
        assert_eq!(
            registry::status(conn.connection(), &ParticipantId::from_number(7)).unwrap(),
            Some(ParticipantStatus::Entered)
        );
    }

    #[test]
    fn test_checkpoint_truncates_wal() {
        let (dir, store) = open_temp();
        let txn = store.begin_write().unwrap();
        registry::insert_range(txn.conn(), 1, 100).unwrap();
        txn.commit().unwrap();

        let wal = dir.path().join("entry.db-wal");
        assert!(std::fs::metadata(&wal).unwrap().len() > 0);

        assert!(store.checkpoint().unwrap());
        assert_eq!(std::fs::metadata(&wal).unwrap().len(), 0);

        let conn = store.read().unwrap();
        assert_eq!(registry::count_total(conn.connection()).unwrap(), 100);
    }

    #[test]
    fn test_writer_lock_wait_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = StoreConfig::in_dir(dir.path()).with_busy_timeout_ms(50);
        let store = SqliteStore::open(cfg).unwrap();

        let _held = store.begin_write().unwrap();
        let err = store.begin_write().err().unwrap();
        assert!(matches!(err, CheckinError::LockTimeout { timeout_ms: 50 }));
    }

    #[test]
    fn test_second_process_sees_busy() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = StoreConfig::in_dir(dir.path()).with_busy_timeout_ms(50);
        let first = SqliteStore::open(cfg.clone()).unwrap();
        let second = SqliteStore::open(cfg).unwrap();

        let _held = first.begin_write().unwrap();
        let err = second.begin_write().err().unwrap();
        assert!(matches!(err, CheckinError::Busy(_)));
        assert!(err.is_transient());
    }
}
