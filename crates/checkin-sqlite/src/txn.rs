use crate::db_err;
use checkin_core::error::Result;
use parking_lot::MutexGuard;
use rusqlite::Connection;

/// Write transaction on the store's writer connection.
///
/// Begins with `BEGIN IMMEDIATE`, so the SQLite write lock is taken up
/// front: a status read inside the transaction cannot be invalidated by
/// another terminal before commit. Rolls back on drop unless committed.
pub struct WriteTxn<'a> {
    conn: MutexGuard<'a, Connection>,
    in_txn: bool,
}

impl<'a> WriteTxn<'a> {
    pub(crate) fn begin(conn: MutexGuard<'a, Connection>) -> Result<Self> {
        conn.execute_batch("BEGIN IMMEDIATE").map_err(db_err)?;
        Ok(Self { conn, in_txn: true })
    }

    /// Connection to run statements on inside the transaction
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn commit(mut self) -> Result<()> {
        if self.in_txn {
            self.conn.execute_batch("COMMIT").map_err(db_err)?;
            self.in_txn = false;
        }
        Ok(())
    }

    pub fn rollback(mut self) {
        if self.in_txn {
            let _ = self.conn.execute_batch("ROLLBACK");
            self.in_txn = false;
        }
    }
}

impl<'a> Drop for WriteTxn<'a> {
    fn drop(&mut self) {
        if self.in_txn {
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}
