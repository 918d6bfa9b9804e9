//! JSON Lines encoding for exported snapshots.
//!
//! One JSON object per line, newline-delimited. Blank lines are ignored on
//! read.

use miette::Diagnostic;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during JSONL operations.
#[derive(Error, Diagnostic, Debug)]
pub enum JsonlError {
    #[error("IO error: {0}")]
    #[diagnostic(code(reviewstore::export::jsonl::io))]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    #[diagnostic(code(reviewstore::export::jsonl::serialize))]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid JSONL line {line}: {error}")]
    #[diagnostic(code(reviewstore::export::jsonl::invalid_line))]
    InvalidLine { line: usize, error: String },
}

/// Write records to a JSONL file, replacing any existing content.
///
/// Returns the number of lines written.
pub fn write_jsonl<T, I>(path: &Path, records: I) -> Result<usize, JsonlError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    let mut written = 0;

    for record in records {
        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}

/// Read records from a JSONL file.
///
/// # Errors
/// Returns [`JsonlError::InvalidLine`] with the 1-based line number of the
/// first line that does not decode into `T`.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, JsonlError> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;

        if line.trim().is_empty() {
            continue;
        }

        let record = serde_json::from_str(&line).map_err(|e| JsonlError::InvalidLine {
            line: line_num + 1,
            error: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(records)
}
