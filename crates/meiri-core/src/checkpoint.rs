//! # Checkpoint Files
//!
//! CSV file sitting between extraction and synchronization. The header
//! labels are part of the on-disk format and are checked on read.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{MeiriError, Result};
use crate::types::{CanonicalRecord, RadicalCode};

/// Header row of every checkpoint file.
pub const CHECKPOINT_HEADER: [&str; 5] = ["篇", "序號", "中文字", "中文字部首", "影片網址"];

#[derive(Debug, Serialize, Deserialize)]
struct CheckpointRow {
    #[serde(rename = "篇")]
    volume: String,
    #[serde(rename = "序號")]
    sequence: String,
    #[serde(rename = "中文字")]
    character: String,
    #[serde(rename = "中文字部首")]
    radical: String,
    #[serde(rename = "影片網址")]
    url: String,
}

impl From<&CanonicalRecord> for CheckpointRow {
    fn from(record: &CanonicalRecord) -> Self {
        Self {
            volume: record.volume.clone(),
            sequence: record.sequence.clone(),
            character: record.character.clone(),
            radical: record.radical.as_str().to_string(),
            url: record.url.clone(),
        }
    }
}

impl From<CheckpointRow> for CanonicalRecord {
    fn from(row: CheckpointRow) -> Self {
        Self {
            volume: row.volume,
            sequence: row.sequence,
            character: row.character,
            radical: RadicalCode::from(row.radical),
            url: row.url,
        }
    }
}

/// Writes records to any writer, header first.
///
/// # Errors
///
/// Returns `MeiriError::Csv` if serialization or the write fails.
pub fn to_writer<W: Write>(writer: W, records: &[CanonicalRecord]) -> Result<()> {
    // Header written by hand so that an empty record set still gets one.
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CHECKPOINT_HEADER)?;
    for record in records {
        wtr.serialize(CheckpointRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads records from any reader, checking the header row first.
///
/// # Errors
///
/// Returns `MeiriError::Format` if the header row differs from
/// [`CHECKPOINT_HEADER`], or `MeiriError::Csv` on malformed rows.
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CanonicalRecord>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(false).from_reader(reader);

    let mut rows = rdr.records();
    let header = match rows.next() {
        Some(row) => row?,
        None => csv::StringRecord::new(),
    };
    if header.iter().ne(CHECKPOINT_HEADER) {
        return Err(MeiriError::Format {
            expected: CHECKPOINT_HEADER.iter().map(|h| h.to_string()).collect(),
            found: header.iter().map(str::to_string).collect(),
        });
    }

    let header = csv::StringRecord::from(CHECKPOINT_HEADER.to_vec());
    rows.map(|row| -> Result<CanonicalRecord> {
        let row: CheckpointRow = row?.deserialize(Some(&header))?;
        Ok(row.into())
    })
    .collect()
}

/// Writes the checkpoint file, replacing any previous content.
///
/// # Errors
///
/// Returns `MeiriError::Io` if the file cannot be created, or
/// `MeiriError::Csv` if writing fails.
pub fn write_checkpoint(path: &Path, records: &[CanonicalRecord]) -> Result<()> {
    to_writer(File::create(path)?, records)?;
    info!(path = %path.display(), records = records.len(), "checkpoint written");
    Ok(())
}

/// Reads a checkpoint file written by [`write_checkpoint`].
///
/// # Errors
///
/// Returns `MeiriError::Io` if the file cannot be opened, plus the errors
/// of [`from_reader`].
pub fn read_checkpoint(path: &Path) -> Result<Vec<CanonicalRecord>> {
    let records = from_reader(File::open(path)?)?;
    info!(path = %path.display(), records = records.len(), "checkpoint read");
    Ok(records)
}
