pub mod log;
pub mod outcome;
pub mod participant;
pub mod payload;

pub use log::{AccessLogEntry, EntryType};
pub use outcome::{RejectReason, ScanOutcome};
pub use participant::{Participant, ParticipantId, ParticipantStatus, ID_WIDTH};
pub use payload::ScanPayload;

use serde::{Deserialize, Serialize};

/// Number of log entries carried by [`Stats::recent_logs`]
pub const RECENT_LOG_LIMIT: usize = 5;

/// Read-only projection polled by the terminal's status board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total: u64,
    pub entered: u64,
    /// Newest first
    pub recent_logs: Vec<AccessLogEntry>,
}
