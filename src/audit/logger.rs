//! Expense history file
//!
//! One JSON object per line, oldest first. The store only appends entries
//! after the data file they describe has been saved.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{ExpenseError, ExpenseResult};

use super::entry::AuditEntry;

/// Reader and appender for the history file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    /// Append entries in one write; nothing is created for an empty slice
    pub fn append(&self, entries: &[AuditEntry]) -> ExpenseResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut lines = String::new();
        for entry in entries {
            lines.push_str(&serde_json::to_string(entry)?);
            lines.push('\n');
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| file.write_all(lines.as_bytes()))
            .map_err(|e| {
                ExpenseError::Io(format!("Cannot append to {}: {}", self.log_path.display(), e))
            })
    }

    /// The last `limit` entries, oldest first; a missing file has none
    pub fn read_recent(&self, limit: usize) -> ExpenseResult<Vec<AuditEntry>> {
        let text = match fs::read_to_string(&self.log_path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let entries = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str::<AuditEntry>)
            .collect::<Result<Vec<_>, _>>()?;

        let skip = entries.len().saturating_sub(limit);
        Ok(entries.into_iter().skip(skip).collect())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
