use crate::error::{CheckinError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A column of the exported access log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportColumn {
    Id,
    ParticipantId,
    Timestamp,
    Type,
    EventName,
}

impl ExportColumn {
    pub const ALL: [ExportColumn; 5] = [
        ExportColumn::Id,
        ExportColumn::ParticipantId,
        ExportColumn::Timestamp,
        ExportColumn::Type,
        ExportColumn::EventName,
    ];

    /// Header text
    pub fn header(self) -> &'static str {
        match self {
            ExportColumn::Id => "id",
            ExportColumn::ParticipantId => "participant_id",
            ExportColumn::Timestamp => "timestamp",
            ExportColumn::Type => "type",
            ExportColumn::EventName => "event_name",
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.header() == name.trim())
            .ok_or_else(|| CheckinError::Config(format!("Unknown export column: {}", name)))
    }
}

/// Options for writing the access log out as delimited text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Prefix the file with a UTF-8 byte-order mark so spreadsheets detect the encoding
    #[serde(default)]
    pub include_bom: bool,

    #[serde(default = "default_columns")]
    pub columns: Vec<ExportColumn>,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_columns() -> Vec<ExportColumn> {
    ExportColumn::ALL.to_vec()
}

fn default_delimiter() -> char {
    ','
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_bom: false,
            columns: default_columns(),
            delimiter: default_delimiter(),
        }
    }
}

impl ExportOptions {
    pub fn with_bom(mut self, include_bom: bool) -> Self {
        self.include_bom = include_bom;
        self
    }

    pub fn with_columns(mut self, columns: Vec<ExportColumn>) -> Self {
        self.columns = columns;
        self
    }

    /// Reject empty or repeated column lists and quote/newline delimiters
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(CheckinError::Config("Export needs at least one column".into()));
        }
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column) {
                return Err(CheckinError::Config(format!(
                    "Export column listed twice: {}",
                    column.header()
                )));
            }
        }
        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(CheckinError::Config(format!(
                "Unusable export delimiter: {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }
}
