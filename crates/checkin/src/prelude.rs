//! Check-in Prelude
//!
//! ```
//! use checkin::prelude::*;
//! ```

pub use crate::{CheckinDb, CheckinError, Result};

pub use crate::{ScanConfig, StoreConfig, SynchronousMode, TerminalConfig};

pub use crate::{
    AccessLogEntry, EntryType, Participant, ParticipantId, ParticipantStatus, RejectReason,
    ScanOutcome, Stats,
};

pub use crate::{ClearSummary, ExportColumn, ExportOptions, ExportSummary};
