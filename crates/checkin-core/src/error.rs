use std::io;
use thiserror::Error;

/// Message shown on the terminal for any infrastructure fault.
pub const SYSTEM_UNAVAILABLE: &str = "System unavailable, please contact staff";

/// Infrastructure faults raised by the store and the engine.
///
/// Scan rejections and duplicate warnings are not errors; they are
/// [`ScanOutcome`](crate::ScanOutcome) values.
#[derive(Error, Debug)]
pub enum CheckinError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Store busy: {0}")]
    Busy(String),

    #[error("Lock wait timed out after {timeout_ms}ms")]
    LockTimeout { timeout_ms: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid id range: start {start} is greater than end {end}")]
    InvalidRange { start: u64, end: u64 },

    #[error("Export error: {0}")]
    Export(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl CheckinError {
    /// Text safe to put on an operator display.
    ///
    /// Precondition violations are the operator's own input and are echoed
    /// back; every other fault collapses to [`SYSTEM_UNAVAILABLE`].
    pub fn user_message(&self) -> String {
        match self {
            CheckinError::InvalidRange { .. } => self.to_string(),
            _ => SYSTEM_UNAVAILABLE.to_string(),
        }
    }

    /// True for lock contention that may succeed if retried later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CheckinError::Busy(_) | CheckinError::LockTimeout { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CheckinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_store_detail() {
        let err = CheckinError::Store("disk I/O error at page 42".into());
        assert_eq!(err.user_message(), SYSTEM_UNAVAILABLE);
        assert!(!err.is_transient());
    }

    #[test]
    fn test_invalid_range_is_echoed() {
        let err = CheckinError::InvalidRange { start: 10, end: 2 };
        assert!(err.user_message().contains("start 10"));
    }

    #[test]
    fn test_lock_timeout_is_transient() {
        let err = CheckinError::LockTimeout { timeout_ms: 50 };
        assert!(err.is_transient());
        assert_eq!(err.user_message(), SYSTEM_UNAVAILABLE);
    }
}
