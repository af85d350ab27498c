//! Store handle shared by every engine operation

use crate::{Result, SqliteStore, StoreConfig};
use std::path::Path;

/// Check-in database handle
///
/// Opened once at startup and passed to whatever drives scans. Operations
/// take `&self`; share it across threads with `Arc`. Other processes may
/// open their own handle on the same file.
pub struct CheckinDb {
    store: SqliteStore,
}

impl CheckinDb {
    /// Open the store at `{dir}/entry.db`, creating it if needed
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::open_with_config(StoreConfig::in_dir(dir))
    }

    /// Open with a custom store configuration
    pub fn open_with_config(config: StoreConfig) -> Result<Self> {
        let store = SqliteStore::open(config)?;
        Ok(Self { store })
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Directory containing the database file
    pub fn data_folder(&self) -> &Path {
        self.store.config().data_folder()
    }

    /// Checkpoint the write-ahead log, then release the connections.
    ///
    /// Dropping the handle also releases them but leaves the `-wal` file for
    /// the next opener to fold in.
    pub fn close(self) -> Result<()> {
        let complete = self.store.checkpoint()?;
        if !complete {
            tracing::warn!(path = %self.path().display(), "WAL checkpoint blocked by a reader");
        }
        tracing::debug!(path = %self.path().display(), "Closed check-in store");
        Ok(())
    }
}
