//! CSV Export functionality
//!
//! Writes expenses with the fixed column set
//! `id,amount,category,description,date,created_at`, the same layout the
//! importer reads back.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ::csv::WriterBuilder;

use crate::error::{ExpenseError, ExpenseResult};
use crate::storage::ExpenseStore;

/// Column order of exported files
pub const CSV_COLUMNS: [&str; 6] = [
    "id",
    "amount",
    "category",
    "description",
    "date",
    "created_at",
];

/// Result of exporting to a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The store was empty; no file was created
    NothingToExport,
    /// This many expenses were written to `path`
    Written { path: PathBuf, count: usize },
}

/// Export all expenses, in store order, to a CSV writer
pub fn export_expenses_csv<W: Write>(store: &ExpenseStore, writer: W) -> ExpenseResult<()> {
    // Header is written by hand so the column order never depends on field order
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer
        .write_record(CSV_COLUMNS)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    for expense in store.expenses() {
        csv_writer
            .serialize(expense)
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}

/// Export all expenses to a CSV file
///
/// An empty store produces no file at all.
pub fn export_to_file(store: &ExpenseStore, path: &Path) -> ExpenseResult<ExportOutcome> {
    if store.is_empty() {
        return Ok(ExportOutcome::NothingToExport);
    }

    let file = File::create(path).map_err(|e| {
        ExpenseError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;

    export_expenses_csv(store, BufWriter::new(file))?;

    Ok(ExportOutcome::Written {
        path: path.to_path_buf(),
        count: store.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, Expense, ExpenseId};
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, ExpenseStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.json"));
        (temp_dir, store)
    }

    fn lunch() -> Expense {
        Expense::from_parts(
            ExpenseId::from("abcd1234"),
            Amount::new(50.0),
            "Food",
            "Lunch, with tip",
            "2024-01-15",
            NaiveDateTime::parse_from_str("2024-01-15T12:30:00", "%Y-%m-%dT%H:%M:%S").unwrap(),
        )
    }

    #[test]
    fn test_export_expenses_csv() {
        let (_temp_dir, mut store) = create_test_store();
        store.extend(vec![lunch()]);

        let mut csv_output = Vec::new();
        export_expenses_csv(&store, &mut csv_output).unwrap();

        let csv_string = String::from_utf8(csv_output).unwrap();
        let mut lines = csv_string.lines();
        assert_eq!(
            lines.next(),
            Some("id,amount,category,description,date,created_at")
        );
        assert_eq!(
            lines.next(),
            Some("abcd1234,50.0,Food,\"Lunch, with tip\",2024-01-15,2024-01-15T12:30:00")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_empty_store_writes_no_file() {
        let (temp_dir, store) = create_test_store();
        let path = temp_dir.path().join("out.csv");

        let outcome = export_to_file(&store, &path).unwrap();
        assert_eq!(outcome, ExportOutcome::NothingToExport);
        assert!(!path.exists());
    }

    #[test]
    fn test_export_to_file() {
        let (temp_dir, mut store) = create_test_store();
        store.add(Amount::new(3.5), "Travel", "Bus", None);
        store.add(Amount::new(8.0), "Food", "Dinner", None);
        let path = temp_dir.path().join("out.csv");

        let outcome = export_to_file(&store, &path).unwrap();
        assert_eq!(
            outcome,
            ExportOutcome::Written {
                path: path.clone(),
                count: 2
            }
        );

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.contains("Travel,Bus"));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let (temp_dir, mut store) = create_test_store();
        store.add(Amount::new(1.0), "Food", "Tea", None);
        let path = temp_dir.path().join("no-such-dir").join("out.csv");

        let err = export_to_file(&store, &path).unwrap_err();
        assert!(matches!(err, ExpenseError::Export(_)));
        assert_eq!(store.len(), 1);
    }
}
