//! JSON output.
//!
//! Records are written as a single JSON array using each record's declared
//! field names. The target file is replaced in full on every write.

use std::path::Path;

use serde::Serialize;

use crate::ScrapeError;

/// How the JSON array is laid out on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single line, no insignificant whitespace.
    #[default]
    Compact,
    /// Indented, one field per line.
    Pretty,
}

/// Encodes `records` as a JSON array.
///
/// # Errors
///
/// Returns [`ScrapeError::Json`] if a record cannot be represented as JSON.
pub fn to_json<T: Serialize>(records: &[T], format: OutputFormat) -> Result<Vec<u8>, ScrapeError> {
    let bytes = match format {
        OutputFormat::Compact => serde_json::to_vec(records)?,
        OutputFormat::Pretty => serde_json::to_vec_pretty(records)?,
    };
    Ok(bytes)
}

/// Writes `records` to `path` as a JSON array, overwriting any existing
/// contents.
///
/// # Errors
///
/// Returns [`ScrapeError::Json`] if encoding fails, or [`ScrapeError::Io`]
/// if the file cannot be written.
pub fn write_json<T: Serialize>(
    path: &Path,
    records: &[T],
    format: OutputFormat,
) -> Result<(), ScrapeError> {
    let bytes = to_json(records, format)?;
    std::fs::write(path, bytes)?;
    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
