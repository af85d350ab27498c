//! Access log export as delimited text.
//!
//! Rows are written in insertion order (ascending sequence number), streamed
//! from one read-only statement so memory use does not grow with the log.

use crate::{AccessLogEntry, CheckinDb, CheckinError, ExportColumn, ExportOptions, Result};
use checkin_core::observe;
use checkin_sqlite::access_log;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: u64,
}

impl CheckinDb {
    /// Export the log to `destination`.
    ///
    /// `None` means the operator cancelled the destination choice; nothing
    /// is written and `Ok(None)` is returned.
    pub fn export_logs(
        &self,
        destination: Option<&Path>,
        options: &ExportOptions,
    ) -> Result<Option<ExportSummary>> {
        let Some(path) = destination else {
            tracing::debug!("Export cancelled, no destination chosen");
            return Ok(None);
        };
        options.validate()?;

        let file = File::create(path)?;
        let rows = match self.export_logs_to_writer(BufWriter::new(file), options) {
            Ok(rows) => rows,
            Err(e) => {
                // Don't leave a truncated artifact that looks complete
                let _ = std::fs::remove_file(path);
                return Err(e);
            }
        };

        tracing::info!(path = %path.display(), rows, "Exported access log");
        Ok(Some(ExportSummary {
            path: path.to_path_buf(),
            rows,
        }))
    }

    /// Stream the log into any writer. Returns the number of data rows.
    pub fn export_logs_to_writer<W: Write>(
        &self,
        mut writer: W,
        options: &ExportOptions,
    ) -> Result<u64> {
        options.validate()?;
        let started = Instant::now();

        if options.include_bom {
            writer.write_all(UTF8_BOM)?;
        }
        let header = options.columns.iter().map(|c| Cow::Borrowed(c.header()));
        write_record(&mut writer, header, options.delimiter)?;

        let conn = self.store().read()?;
        let rows = access_log::for_each(conn.connection(), |entry| {
            let fields = options.columns.iter().map(|c| column_value(&entry, *c));
            write_record(&mut writer, fields, options.delimiter)
        })?;

        writer
            .flush()
            .map_err(|e| CheckinError::Export(format!("flush failed: {}", e)))?;

        observe::record_export(started.elapsed(), rows);
        Ok(rows)
    }
}

fn column_value(entry: &AccessLogEntry, column: ExportColumn) -> Cow<'_, str> {
    match column {
        ExportColumn::Id => Cow::Owned(entry.id.to_string()),
        ExportColumn::ParticipantId => Cow::Borrowed(entry.participant_id.as_str()),
        ExportColumn::Timestamp => Cow::Owned(access_log::format_timestamp(&entry.timestamp)),
        ExportColumn::Type => Cow::Borrowed(entry.entry_type.as_str()),
        ExportColumn::EventName => Cow::Borrowed(entry.event_name.as_str()),
    }
}

fn write_record<'a, W, I>(writer: &mut W, fields: I, delimiter: char) -> Result<()>
where
    W: Write,
    I: Iterator<Item = Cow<'a, str>>,
{
    let mut line = String::new();
    for (i, field) in fields.enumerate() {
        if i > 0 {
            line.push(delimiter);
        }
        line.push_str(&escape_field(&field, delimiter));
    }
    line.push('\n');
    writer.write_all(line.as_bytes())?;
    Ok(())
}

/// Quote a field if it contains the delimiter, a quote or a line break
fn escape_field(field: &str, delimiter: char) -> Cow<'_, str> {
    let needs_quotes = field
        .chars()
        .any(|c| c == delimiter || c == '"' || c == '\n' || c == '\r');
    if !needs_quotes {
        return Cow::Borrowed(field);
    }
    Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
}
