use crate::error::{Error, Result};
use log::debug;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File written by [`FileHistory::default`]
pub const DEFAULT_HISTORY_FILE: &str = "calculation_history.jsonl";

/// One successful evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// The input, as given by the caller
    pub expression: String,
    /// Text of the infix tokens
    pub tokens: Vec<String>,
    /// Text of the postfix tokens
    pub postfix: Vec<String>,
    /// The value returned to the caller
    pub result: f64,
}

impl Display for HistoryRecord {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        writeln!(fmt, "Expression: {}", self.expression)?;
        writeln!(fmt, "Tokens: {}", self.tokens.join(" "))?;
        writeln!(fmt, "RPN: {}", self.postfix.join(" "))?;
        write!(fmt, "Result: {}", self.result)
    }
}

/// Somewhere to append evaluation records. Implementations must never
/// overwrite or reorder earlier records.
pub trait HistorySink {
    /// Append `record` after every previous one
    fn append(&self, record: &HistoryRecord) -> Result<()>;
}

impl<S: HistorySink + ?Sized> HistorySink for Arc<S> {
    fn append(&self, record: &HistoryRecord) -> Result<()> {
        (**self).append(record)
    }
}

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct MemoryHistory {
    records: Mutex<Vec<HistoryRecord>>,
}

impl MemoryHistory {
    /// Create an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of all the records, oldest first
    #[must_use]
    pub fn records(&self) -> Vec<HistoryRecord> {
        self.records.lock().clone()
    }

    /// Number of records so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Check if nothing was recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl HistorySink for MemoryHistory {
    fn append(&self, record: &HistoryRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Appends records to a file, one JSON object per line
#[derive(Debug, Clone)]
pub struct FileHistory {
    path: PathBuf,
}

impl Default for FileHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_FILE)
    }
}

impl FileHistory {
    /// Record to the file at `path`. The file is created on the first
    /// record if needed.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the history file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, cause: &dyn Display) -> Error {
        Error::History(format!(
            "failed to write history to {}: {}",
            self.path.display(),
            cause
        ))
    }
}

impl HistorySink for FileHistory {
    fn append(&self, record: &HistoryRecord) -> Result<()> {
        let line = serde_json::to_string(record).map_err(|e| self.error(&e))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.error(&e))?;
        writeln!(file, "{}", line).map_err(|e| self.error(&e))?;
        debug!("appended history record to {}", self.path.display());
        Ok(())
    }
}
