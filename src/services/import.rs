//! CSV Import service
//!
//! Reads expenses back from the export layout. The header must name at
//! least `id, amount, category, description, date`; `created_at` is
//! optional. Each row's amount is re-checked and rows that fail are skipped,
//! not fatal. Every other field is taken as given.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use ::csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::expense::{now, parse_timestamp};
use crate::models::{Amount, Expense, ExpenseId};
use crate::storage::ExpenseStore;

/// Columns every import file must have
pub const REQUIRED_COLUMNS: [&str; 5] = ["id", "amount", "category", "description", "date"];

/// Optional creation timestamp column
pub const CREATED_AT_COLUMN: &str = "created_at";

/// Why an import was abandoned before anything was added
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("File '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("CSV file error: {0}")]
    MalformedCsv(String),

    #[error("Invalid CSV format - missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// A row left out because its amount was unusable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Data row number, starting at 1 after the header
    pub row_number: usize,
    /// The amount text as it appeared in the file
    pub amount: String,
}

/// Rows read from a CSV file, before they touch the store
#[derive(Debug, Clone, Default)]
pub struct ParsedImport {
    pub expenses: Vec<Expense>,
    pub skipped: Vec<SkippedRow>,
}

/// Result of a completed import attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// Rows were appended and the store was saved
    Imported {
        added: usize,
        skipped: Vec<SkippedRow>,
    },
    /// Every row was skipped; the store is unchanged
    NoValidRows { skipped: Vec<SkippedRow> },
    /// Rows were appended in memory but saving failed
    SaveFailed { added: usize, reason: String },
    /// Nothing was read
    Failed(ImportError),
}

/// Service for CSV import
pub struct ImportService<'a> {
    store: &'a mut ExpenseStore,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(store: &'a mut ExpenseStore) -> Self {
        Self { store }
    }

    /// Import a CSV file into the store and save it
    pub fn import_file(&mut self, path: &Path) -> ImportOutcome {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return ImportOutcome::Failed(ImportError::FileNotFound(path.to_path_buf()));
            }
            Err(e) => return ImportOutcome::Failed(ImportError::MalformedCsv(e.to_string())),
        };

        match Self::parse_csv(file) {
            Ok(parsed) => self.apply(parsed),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Import aborted");
                ImportOutcome::Failed(e)
            }
        }
    }

    /// Append parsed rows to the store and save it
    pub fn apply(&mut self, parsed: ParsedImport) -> ImportOutcome {
        let ParsedImport { expenses, skipped } = parsed;

        if expenses.is_empty() {
            return ImportOutcome::NoValidRows { skipped };
        }

        let added = expenses.len();
        self.store.extend(expenses);

        match self.store.save() {
            Ok(()) => {
                info!(added, skipped = skipped.len(), "Imported expenses");
                ImportOutcome::Imported { added, skipped }
            }
            Err(e) => ImportOutcome::SaveFailed {
                added,
                reason: e.to_string(),
            },
        }
    }

    /// Parse CSV text into expenses without touching the store
    pub fn parse_csv<R: Read>(reader: R) -> Result<ParsedImport, ImportError> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| ImportError::MalformedCsv(e.to_string()))?
            .clone();
        let columns = ColumnIndex::from_headers(&headers)?;

        let mut parsed = ParsedImport::default();
        for (idx, result) in reader.records().enumerate() {
            let record = result.map_err(|e| ImportError::MalformedCsv(e.to_string()))?;
            let row_number = idx + 1;

            let amount_text = columns.field(&record, "amount");
            let amount = match Amount::parse(amount_text) {
                Ok(amount) if amount.is_positive() => amount,
                _ => {
                    warn!(row = row_number, amount = amount_text, "Skipping invalid amount");
                    parsed.skipped.push(SkippedRow {
                        row_number,
                        amount: amount_text.to_string(),
                    });
                    continue;
                }
            };

            let created_at = match columns.optional_field(&record, CREATED_AT_COLUMN) {
                Some(text) if !text.trim().is_empty() => {
                    parse_timestamp(text).unwrap_or_else(|| {
                        warn!(row = row_number, created_at = text, "Unreadable created_at, using now");
                        now()
                    })
                }
                _ => now(),
            };

            parsed.expenses.push(Expense::from_parts(
                ExpenseId::from(columns.field(&record, "id")),
                amount,
                columns.field(&record, "category").trim(),
                columns.field(&record, "description").trim(),
                columns.field(&record, "date"),
                created_at,
            ));
        }

        Ok(parsed)
    }
}

/// Header name to column position
struct ColumnIndex(HashMap<String, usize>);

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, ImportError> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !index.contains_key(**column))
            .map(|column| column.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        Ok(Self(index))
    }

    fn optional_field<'r>(&self, record: &'r StringRecord, column: &str) -> Option<&'r str> {
        self.0.get(column).and_then(|&i| record.get(i))
    }

    /// A required column; rows are checked for equal length by the reader
    fn field<'r>(&self, record: &'r StringRecord, column: &str) -> &'r str {
        self.optional_field(record, column).unwrap_or("")
    }
}
