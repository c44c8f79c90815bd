//! Path management for the expense tracker
//!
//! Everything hangs off a single data file, which defaults to
//! `expenses.json` in the working directory.
//!
//! ## Derived paths
//!
//! - Audit log: the data file with its extension replaced by `audit.log`
//! - Settings: `expense-tracker.json` next to the data file

use std::path::{Path, PathBuf};

use crate::error::ExpenseError;

/// Default data file name
pub const DEFAULT_DATA_FILE: &str = "expenses.json";

/// Settings file name, resolved next to the data file
pub const SETTINGS_FILE: &str = "expense-tracker.json";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    data_file: PathBuf,
}

impl ExpensePaths {
    /// Create paths rooted at the given data file, or the default one
    pub fn new(data_file: Option<PathBuf>) -> Self {
        Self {
            data_file: data_file.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
        }
    }

    /// Create paths with the data file inside a directory (useful for testing)
    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        Self {
            data_file: base_dir.as_ref().join(DEFAULT_DATA_FILE),
        }
    }

    /// Get the path to the expenses store
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Directory holding the data file
    pub fn base_dir(&self) -> &Path {
        self.data_file.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.data_file.with_extension("audit.log")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir().join(SETTINGS_FILE)
    }

    /// Ensure the directory holding the data file exists
    pub fn ensure_directories(&self) -> Result<(), ExpenseError> {
        let dir = self.base_dir();
        if dir.as_os_str().is_empty() {
            return Ok(());
        }

        std::fs::create_dir_all(dir)
            .map_err(|e| ExpenseError::Io(format!("Failed to create data directory: {}", e)))
    }
}

impl Default for ExpensePaths {
    fn default() -> Self {
        Self::new(None)
    }
}
