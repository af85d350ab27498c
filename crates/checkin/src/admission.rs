//! Scan admission
//!
//! A scan runs through four steps, cheapest first:
//! 1. **Event guard**: the payload's event name must match the filter
//! 2. **Id and range guard**: the id must be numeric and at or above the floor
//! 3. **Lookup**: the id must be registered
//! 4. **Status branch**: admit once, log a re-entry, or warn of a duplicate
//!
//! Steps 1 and 2 never touch the store. Steps 3 and 4 run inside one
//! immediate transaction, and the status change is a conditional update, so
//! concurrent scans of one id (from this process or another terminal) yield
//! exactly one admission and exactly one first-entry row.

use crate::{
    CheckinDb, EntryType, ParticipantId, ParticipantStatus, RejectReason, Result, ScanConfig,
    ScanOutcome, ScanPayload,
};
use checkin_core::observe;
use checkin_sqlite::{access_log, registry};
use chrono::Utc;
use std::time::Instant;

/// Store-free checks, in order: event name, id shape, range floor.
pub fn precheck(payload: &ScanPayload<'_>, config: &ScanConfig) -> Option<RejectReason> {
    if let Some(expected) = config.event_filter() {
        if payload.event_name != expected {
            return Some(RejectReason::EventMismatch);
        }
    }

    let number = match payload.number() {
        Some(n) => n,
        None => return Some(RejectReason::MalformedId),
    };

    if config.range_limit_on && number < config.min_id {
        return Some(RejectReason::BelowRangeFloor {
            min_id: config.min_id,
        });
    }

    None
}

impl CheckinDb {
    /// Decide the outcome of one scanned payload.
    ///
    /// Rejections and duplicates are `Ok` outcomes; `Err` means the store
    /// could not be used.
    pub fn scan(&self, raw_payload: &str, config: &ScanConfig) -> Result<ScanOutcome> {
        let started = Instant::now();
        let payload = ScanPayload::parse(raw_payload);

        let result = match precheck(&payload, config) {
            Some(reason) => Ok(ScanOutcome::Rejected {
                id: payload.id.clone(),
                reason,
            }),
            None => self.admit(&payload.id, payload.event_name, config.allow_re_entry),
        };

        match &result {
            Ok(outcome) => {
                observe::record_scan(started.elapsed(), outcome.kind());
                tracing::debug!(id = %outcome.id(), outcome = outcome.kind(), "Scan processed");
            }
            Err(e) => {
                observe::record_scan_fault();
                tracing::warn!(id = %payload.id, error = %e, "Scan failed");
            }
        }
        result
    }

    fn admit(
        &self,
        id: &ParticipantId,
        event_name: &str,
        allow_re_entry: bool,
    ) -> Result<ScanOutcome> {
        let txn = self.store().begin_write()?;
        let conn = txn.conn();

        let admitted = match registry::status(conn, id)? {
            None => {
                return Ok(ScanOutcome::Rejected {
                    id: id.clone(),
                    reason: RejectReason::UnregisteredId,
                })
            }
            Some(ParticipantStatus::NotEntered) => {
                let won = registry::mark_entered(conn, id)?;
                if !won {
                    tracing::warn!(id = %id, "Conditional admission update matched no row");
                }
                won
            }
            Some(ParticipantStatus::Entered) => false,
        };

        let outcome = if admitted {
            access_log::append(conn, id, EntryType::FirstEntry, event_name, Utc::now())?;
            ScanOutcome::Success { id: id.clone() }
        } else if allow_re_entry {
            access_log::append(conn, id, EntryType::ReEntry, event_name, Utc::now())?;
            ScanOutcome::ReEntry { id: id.clone() }
        } else {
            txn.rollback();
            return Ok(ScanOutcome::DuplicateWarning { id: id.clone() });
        };

        txn.commit()?;
        Ok(outcome)
    }
}
