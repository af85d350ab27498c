//! Check-in Core: types, configuration and errors for the admission engine
//!
//! This crate holds everything the storage layer and the engine agree on:
//! - Participant identity and admission status
//! - Access log entries and their event types
//! - Scan outcomes returned to the terminal
//! - Store, scan and export configuration
//!
//! It contains no storage code.

pub mod config;
pub mod error;
pub mod observe;
pub mod types;

pub use config::{
    ExportColumn, ExportOptions, ReadPoolConfig, ScanConfig, StoreConfig, SynchronousMode,
    TerminalConfig,
};
pub use error::{CheckinError, Result};
pub use types::{
    AccessLogEntry, EntryType, Participant, ParticipantId, ParticipantStatus, RejectReason,
    ScanOutcome, ScanPayload, Stats, ID_WIDTH, RECENT_LOG_LIMIT,
};
