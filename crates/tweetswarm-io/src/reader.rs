//! Record reader trait and the JSON dataset reader
//!
//! Ingestion is all-or-nothing: either every retained element converts into
//! a [`Record`] and the whole batch is returned, or an [`IngestionError`]
//! is returned and the caller keeps whatever dataset it had before. The one
//! exception is a row whose `Month` names no plot row; it is skipped with a
//! warning.

use crate::schema::{Category, Record};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maximum number of records kept from one file
pub const DEFAULT_MAX_RECORDS: usize = 300;

/// Errors that can occur while ingesting a dataset
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid record at index {index}: {message}")]
    InvalidRecord { index: usize, message: String },
}

/// Result type for ingestion
pub type IngestResult<T> = Result<T, IngestionError>;

/// Options applied while ingesting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Elements beyond this count are dropped silently
    pub max_records: usize,
}

impl IngestOptions {
    /// Set the record limit
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

/// Trait for reading tweet records from a source
pub trait RecordReader {
    /// Read, truncate and convert the whole source
    fn read(&self, options: &IngestOptions) -> IngestResult<Vec<Record>>;
}

/// Reader for a JSON file holding an array of record objects
#[derive(Debug, Clone)]
pub struct JsonReader {
    path: PathBuf,
}

impl JsonReader {
    /// Open a JSON file
    pub fn open(path: impl AsRef<Path>) -> IngestResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IngestionError::FileNotFound(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl RecordReader for JsonReader {
    fn read(&self, options: &IngestOptions) -> IngestResult<Vec<Record>> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| IngestionError::Io(format!("{}: {}", self.path.display(), e)))?;
        let records = parse_records(&text, options)?;
        tracing::info!(
            "Loaded {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

/// Parse a JSON array of records, keeping at most `options.max_records`
///
/// The full text must be valid JSON even when it is truncated afterwards;
/// only the retained elements are converted into records. Retained elements
/// whose `Month` is a string outside March/April/May are dropped, so the
/// result can be shorter than the limit.
pub fn parse_records(text: &str, options: &IngestOptions) -> IngestResult<Vec<Record>> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| IngestionError::Parse(e.to_string()))?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(IngestionError::Parse(format!(
                "expected a JSON array of records, found {}",
                json_kind(&other)
            )))
        }
    };

    let total = items.len();
    if total > options.max_records {
        tracing::debug!(
            "Dropping {} records beyond the limit of {}",
            total - options.max_records,
            options.max_records
        );
    }

    let mut records = Vec::with_capacity(total.min(options.max_records));
    let mut skipped = 0;
    for (index, item) in items.into_iter().take(options.max_records).enumerate() {
        if let Some(month) = unknown_month(&item) {
            tracing::warn!("Skipping record {}: unknown month {:?}", index, month);
            skipped += 1;
            continue;
        }
        let record =
            serde_json::from_value::<Record>(item).map_err(|e| IngestionError::InvalidRecord {
                index,
                message: e.to_string(),
            })?;
        records.push(record);
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} records with an unknown month", skipped);
    }
    Ok(records)
}

/// The `Month` string of an element, when it names no plot row
///
/// A missing or non-string `Month` is left to record conversion to reject.
fn unknown_month(item: &serde_json::Value) -> Option<&str> {
    let value = item.get("Month")?;
    let month = value.as_str()?;
    Category::deserialize(value).is_err().then_some(month)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Open a file and return an appropriate reader
///
/// The format is detected from the file extension.
pub fn open_file(path: impl AsRef<Path>) -> IngestResult<Box<dyn RecordReader>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => Ok(Box::new(JsonReader::open(path)?)),
        _ => Err(IngestionError::UnsupportedFormat(format!(
            "Unknown file extension: {}",
            extension
        ))),
    }
}

/// Open, read and truncate a dataset file in one step
pub fn read_records(path: impl AsRef<Path>, options: &IngestOptions) -> IngestResult<Vec<Record>> {
    open_file(path)?.read(options)
}
