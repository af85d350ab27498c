use super::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of admission event recorded in the access log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    FirstEntry,
    ReEntry,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::FirstEntry => "first_entry",
            EntryType::ReEntry => "re_entry",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "first_entry" => Some(EntryType::FirstEntry),
            "re_entry" => Some(EntryType::ReEntry),
            _ => None,
        }
    }
}

/// One immutable row of the access log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLogEntry {
    /// Store-assigned sequence number; strictly increasing, never reused
    pub id: i64,
    pub participant_id: ParticipantId,
    pub timestamp: DateTime<Utc>,
    pub entry_type: EntryType,
    pub event_name: String,
}
