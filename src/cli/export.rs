//! CLI handling for CSV export

use std::path::PathBuf;

use crate::config::Settings;
use crate::export::{export_to_file, ExportOutcome};
use crate::storage::ExpenseStore;

/// Export to `file`, or the dated default name, and describe the result
pub fn run_export(store: &ExpenseStore, settings: &Settings, file: Option<PathBuf>) -> String {
    let path = file.unwrap_or_else(|| settings.default_export_file());

    match export_to_file(store, &path) {
        Ok(ExportOutcome::NothingToExport) => "No expenses to save\n".to_string(),
        Ok(ExportOutcome::Written { path, count }) => {
            format!("Saved {} expenses to {}\n", count, path.display())
        }
        Err(e) => format!(" Save failed: {}\n", e),
    }
}
