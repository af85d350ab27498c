//! Destructive maintenance: bulk id initialization and log clearing.
//!
//! Both run in one immediate transaction, which also holds off admissions
//! from every terminal sharing the store until the wipe commits. Callers are
//! expected to confirm with the operator before invoking either.

use crate::{CheckinDb, CheckinError, Result};
use checkin_core::observe;
use checkin_sqlite::{access_log, registry};
use serde::{Deserialize, Serialize};

/// What a log clear removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearSummary {
    pub logs_deleted: u64,
    pub participants_reset: u64,
    /// False if the post-clear `VACUUM` failed; the clear itself committed
    pub compacted: bool,
}

impl CheckinDb {
    /// Wipe the registry and the log, then register every id in `start..=end`.
    ///
    /// Returns the number of participants created.
    pub fn initialize_ids(&self, start: u64, end: u64) -> Result<u64> {
        if start > end {
            return Err(CheckinError::InvalidRange { start, end });
        }

        tracing::warn!(start, end, "Resetting participant registry and access log");

        let txn = self.store().begin_write()?;
        let logs_deleted = access_log::delete_all(txn.conn())?;
        let participants_deleted = registry::delete_all(txn.conn())?;
        let count = registry::insert_range(txn.conn(), start, end)?;
        txn.commit()?;

        observe::record_initialize(count);
        tracing::info!(
            count,
            participants_deleted,
            logs_deleted,
            "Initialized participant ids"
        );
        Ok(count)
    }

    /// Delete every log entry and set every participant back to not entered.
    ///
    /// Ids survive. The store is compacted after the clear commits.
    pub fn clear_logs(&self) -> Result<ClearSummary> {
        tracing::warn!("Clearing access log and admission statuses");

        let txn = self.store().begin_write()?;
        let logs_deleted = access_log::delete_all(txn.conn())? as u64;
        let participants_reset = registry::reset_all_statuses(txn.conn())? as u64;
        txn.commit()?;

        // VACUUM cannot run inside a transaction
        let compacted = match self.store().vacuum() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Compaction after clear failed");
                false
            }
        };

        observe::record_clear();
        tracing::info!(logs_deleted, participants_reset, compacted, "Cleared access log");
        Ok(ClearSummary {
            logs_deleted,
            participants_reset,
            compacted,
        })
    }
}
