//! Read-only projections for the status board

use crate::{
    AccessLogEntry, CheckinDb, Participant, ParticipantId, ParticipantStatus, Result, Stats,
};
use checkin_core::RECENT_LOG_LIMIT;
use checkin_sqlite::{access_log, registry};

impl CheckinDb {
    /// Totals and the newest log entries.
    ///
    /// Served from a read-only connection; may trail an in-flight admission.
    pub fn stats(&self) -> Result<Stats> {
        let conn = self.store().read()?;
        let conn = conn.connection();
        Ok(Stats {
            total: registry::count_total(conn)?,
            entered: registry::count_with_status(conn, ParticipantStatus::Entered)?,
            recent_logs: access_log::recent(conn, RECENT_LOG_LIMIT)?,
        })
    }

    pub fn participant(&self, id: &ParticipantId) -> Result<Option<Participant>> {
        let conn = self.store().read()?;
        registry::get(conn.connection(), id)
    }

    /// Every log entry for one participant, oldest first
    pub fn history(&self, id: &ParticipantId) -> Result<Vec<AccessLogEntry>> {
        let conn = self.store().read()?;
        access_log::for_participant(conn.connection(), id)
    }

    pub fn log_count(&self) -> Result<u64> {
        let conn = self.store().read()?;
        access_log::count(conn.connection())
    }

    /// All registered ids, ascending
    pub fn participant_ids(&self) -> Result<Vec<ParticipantId>> {
        let conn = self.store().read()?;
        registry::list_ids(conn.connection())
    }
}
