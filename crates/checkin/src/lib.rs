//! Check-in: admission and logging engine for event entry terminals
//!
//! Operators scan QR-coded attendee ids; each scan is checked against a
//! persisted participant registry and the attendee is admitted, rejected or
//! flagged. Every admission is durably logged.
//!
//! - **Admission**: validate the payload, apply the terminal's policy and
//!   move a participant to entered exactly once
//! - **Access log**: append-only audit trail, exportable as delimited text
//! - **Maintenance**: bulk id initialization and log clearing
//! - **Stats**: totals and the most recent log entries for a status board
//!
//! # Quick Start
//!
//! ```no_run
//! use checkin::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let db = CheckinDb::open("./data")?;
//! db.initialize_ids(1, 500)?;
//!
//! let config = ScanConfig::default().with_event_name("EXPO");
//! let outcome = db.scan("EXPO,42", &config)?;
//! println!("{} ({})", outcome.message(), outcome.id());
//!
//! let stats = db.stats()?;
//! println!("{}/{} entered", stats.entered, stats.total);
//! # Ok(())
//! # }
//! ```

pub mod admission;
pub mod db;
pub mod export;
pub mod maintenance;
pub mod prelude;
pub mod stats;

pub use checkin_core::{
    config::{
        ExportColumn, ExportOptions, ReadPoolConfig, ScanConfig, StoreConfig, SynchronousMode,
        TerminalConfig,
    },
    error::{CheckinError, Result, SYSTEM_UNAVAILABLE},
    types::{
        AccessLogEntry, EntryType, Participant, ParticipantId, ParticipantStatus, RejectReason,
        ScanOutcome, ScanPayload, Stats, ID_WIDTH, RECENT_LOG_LIMIT,
    },
};
pub use checkin_sqlite::SqliteStore;

pub use admission::precheck;
pub use db::CheckinDb;
pub use export::ExportSummary;
pub use maintenance::ClearSummary;
