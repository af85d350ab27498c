use serde::{Deserialize, Serialize};
use std::fmt;

/// Width every participant id is zero-padded to
pub const ID_WIDTH: usize = 6;

/// Normalized participant identifier, e.g. `"000042"`.
///
/// Normalization trims surrounding whitespace and left-pads with `'0'` to
/// [`ID_WIDTH`]. The result is not guaranteed to be numeric; see
/// [`ParticipantId::number`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Id for an integer in an initialized range
    pub fn from_number(n: u64) -> Self {
        Self(format!("{:0width$}", n, width = ID_WIDTH))
    }

    /// Normalize a raw id as it appears in a scanned payload
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len >= ID_WIDTH {
            return Self(trimmed.to_string());
        }
        let mut padded = "0".repeat(ID_WIDTH - len);
        padded.push_str(trimmed);
        Self(padded)
    }

    /// Wrap an id read back from the store
    pub fn from_stored(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, or `None` unless the id is made only of ASCII digits
    pub fn number(&self) -> Option<u64> {
        if self.0.is_empty() || !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ParticipantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Admission status. Only ever moves `NotEntered -> Entered` through a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    NotEntered,
    Entered,
}

impl ParticipantStatus {
    /// Stored column value
    pub fn as_str(self) -> &'static str {
        match self {
            ParticipantStatus::NotEntered => "not_entered",
            ParticipantStatus::Entered => "entered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "not_entered" => Some(ParticipantStatus::NotEntered),
            "entered" => Some(ParticipantStatus::Entered),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub status: ParticipantStatus,
}
