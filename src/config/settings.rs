//! User settings for the expense tracker
//!
//! Display and export preferences. The file is optional; anything missing
//! falls back to its default.

use chrono::Local;
use serde::Deserialize;
use std::path::PathBuf;

use super::paths::ExpensePaths;
use crate::error::ExpenseError;

/// User settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Currency symbol shown in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// How many expenses the interactive delete prompt lists
    #[serde(default = "default_delete_preview_limit")]
    pub delete_preview_limit: usize,

    /// File name prefix for CSV exports without an explicit name
    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_delete_preview_limit() -> usize {
    10
}

fn default_export_prefix() -> String {
    "expenses_export".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency(),
            delete_preview_limit: default_delete_preview_limit(),
            export_prefix: default_export_prefix(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    ///
    /// The file is never created.
    pub fn load(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ExpenseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Default export file name, e.g. `expenses_export_2024-01-15.csv`
    pub fn default_export_file(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}_{}.csv",
            self.export_prefix,
            Local::now().date_naive().format("%Y-%m-%d")
        ))
    }
}
