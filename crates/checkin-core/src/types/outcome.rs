use super::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Why a scan was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Payload event name differs from the configured filter
    EventMismatch,
    /// Identifier is empty or not a non-negative integer
    MalformedId,
    /// Identifier is below the configured range floor
    BelowRangeFloor { min_id: u64 },
    /// Identifier is not in the registry
    UnregisteredId,
}

impl RejectReason {
    pub fn message(&self) -> String {
        match self {
            RejectReason::EventMismatch => "Event mismatch".to_string(),
            RejectReason::MalformedId => "Invalid ID".to_string(),
            RejectReason::BelowRangeFloor { min_id } => {
                format!("Invalid (below {})", min_id)
            }
            RejectReason::UnregisteredId => "Unregistered ID".to_string(),
        }
    }
}

/// Result of a single scan, returned to the terminal and never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// First admission; status moved to entered and a first-entry row was logged
    Success { id: ParticipantId },
    /// Already entered, re-entry allowed; a re-entry row was logged
    ReEntry { id: ParticipantId },
    /// Already entered, re-entry not allowed; nothing was written
    DuplicateWarning { id: ParticipantId },
    Rejected {
        id: ParticipantId,
        reason: RejectReason,
    },
}

impl ScanOutcome {
    /// Normalized identifier, for display
    pub fn id(&self) -> &ParticipantId {
        match self {
            ScanOutcome::Success { id }
            | ScanOutcome::ReEntry { id }
            | ScanOutcome::DuplicateWarning { id }
            | ScanOutcome::Rejected { id, .. } => id,
        }
    }

    /// Short status-board text
    pub fn message(&self) -> String {
        match self {
            ScanOutcome::Success { .. } => "Entry OK".to_string(),
            ScanOutcome::ReEntry { .. } => "Re-entry OK".to_string(),
            ScanOutcome::DuplicateWarning { .. } => "Already entered".to_string(),
            ScanOutcome::Rejected { reason, .. } => reason.message(),
        }
    }

    /// Stable label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            ScanOutcome::Success { .. } => "success",
            ScanOutcome::ReEntry { .. } => "re_entry",
            ScanOutcome::DuplicateWarning { .. } => "duplicate",
            ScanOutcome::Rejected { .. } => "rejected",
        }
    }

    /// Whether the attendee may pass the gate
    pub fn is_admitted(&self) -> bool {
        matches!(self, ScanOutcome::Success { .. } | ScanOutcome::ReEntry { .. })
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            ScanOutcome::Rejected { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
