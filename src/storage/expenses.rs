//! Expense store backed by a JSON file
//!
//! Holds the expenses in insertion order and mirrors them to disk on request.
//! Nothing is written until [`ExpenseStore::save`] is called.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::ExpensePaths;
use crate::error::ExpenseResult;
use crate::models::{validate_expense, Amount, Expense, NewExpense};
use crate::reports::{CategoryStats, ExpenseSummary};

use super::file_io::{read_json, write_json_atomic};

/// What happened when the store file was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The file was read; this many expenses were loaded
    Loaded(usize),
    /// There was no file yet; the store starts empty
    Missing,
    /// The file could not be read or parsed; the store starts empty
    Recovered { reason: String },
}

impl LoadStatus {
    /// Whether existing data had to be discarded
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }
}

/// In-memory expense collection and its file mirror
#[derive(Debug)]
pub struct ExpenseStore {
    path: PathBuf,
    expenses: Vec<Expense>,
    audit: Option<AuditLogger>,
    /// History entries for changes not yet saved
    unsaved: Vec<AuditEntry>,
}

impl ExpenseStore {
    /// Create an empty store for the given file without reading it
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            expenses: Vec::new(),
            audit: None,
            unsaved: Vec::new(),
        }
    }

    /// Open the store described by `paths`, with auditing, and load it
    pub fn open(paths: &ExpensePaths) -> (Self, LoadStatus) {
        let mut store =
            Self::new(paths.data_file()).with_audit(AuditLogger::new(paths.audit_log()));
        let status = store.load();
        (store, status)
    }

    /// Attach an audit logger
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Get the audit logger, if any
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory contents with the file's
    ///
    /// Never fails: a missing or unreadable file leaves the store empty and
    /// the returned status says why.
    pub fn load(&mut self) -> LoadStatus {
        self.unsaved.clear();

        if !self.path.exists() {
            debug!(path = %self.path.display(), "No expenses file, starting empty");
            self.expenses = Vec::new();
            return LoadStatus::Missing;
        }

        match read_json::<Vec<Expense>>(&self.path) {
            Ok(expenses) => {
                debug!(path = %self.path.display(), count = expenses.len(), "Loaded expenses");
                let count = expenses.len();
                self.expenses = expenses;
                LoadStatus::Loaded(count)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable expenses file");
                self.expenses = Vec::new();
                LoadStatus::Recovered {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Write every expense to the backing file, replacing it
    ///
    /// History for the changes since the last save is appended only once the
    /// file has been written; after a failed save it waits for the next one.
    pub fn save(&mut self) -> ExpenseResult<()> {
        write_json_atomic(&self.path, &self.expenses)?;
        debug!(path = %self.path.display(), count = self.expenses.len(), "Saved expenses");

        let entries = std::mem::take(&mut self.unsaved);
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.append(&entries) {
                warn!(path = %logger.path().display(), error = %e, "Failed to write audit log");
            }
        }
        Ok(())
    }

    /// Check raw input before calling [`add`](Self::add)
    ///
    /// Returns every problem found; empty means valid.
    pub fn validate(amount: &str, category: &str, description: &str) -> Vec<String> {
        validate_expense(amount, category, description)
    }

    /// Append a new expense and return it
    ///
    /// The input is not validated: callers that skip [`validate`](Self::validate)
    /// can store non-positive amounts or empty labels. Use
    /// [`add_new`](Self::add_new) for checked input.
    pub fn add(
        &mut self,
        amount: Amount,
        category: &str,
        description: &str,
        date: Option<String>,
    ) -> Expense {
        self.push_created(Expense::new(amount, category, description, date))
    }

    /// Append an expense built from validated input
    pub fn add_new(&mut self, input: NewExpense) -> Expense {
        self.push_created(input.into_expense())
    }

    fn push_created(&mut self, expense: Expense) -> Expense {
        debug!(id = %expense.id, amount = expense.amount.value(), "Added expense");
        self.record(vec![AuditEntry::create(&expense)]);
        self.expenses.push(expense.clone());
        expense
    }

    /// Append already-built expenses as they are (import path)
    pub fn extend(&mut self, expenses: Vec<Expense>) {
        let entries: Vec<_> = expenses.iter().map(AuditEntry::import).collect();
        self.record(entries);
        self.expenses.extend(expenses);
    }

    /// All expenses, most recently created first
    ///
    /// Records with equal `created_at` keep their insertion order.
    pub fn list_all(&self) -> Vec<Expense> {
        let mut expenses = self.expenses.clone();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        expenses
    }

    /// Expenses whose category matches, ignoring case
    pub fn filter_by_category(&self, category: &str) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|e| e.in_category(category))
            .cloned()
            .collect()
    }

    /// Expenses dated within `start..=end`
    ///
    /// Dates are compared as text, so both bounds must be `YYYY-MM-DD`.
    pub fn filter_by_date_range(&self, start: &str, end: &str) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|e| e.in_date_range(start, end))
            .cloned()
            .collect()
    }

    /// Remove every expense with this id
    ///
    /// Ids are not guaranteed unique, so all matches go. Returns whether
    /// anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.expenses)
            .into_iter()
            .partition(|e| e.id == *id);
        self.expenses = kept;

        if removed.is_empty() {
            return false;
        }

        debug!(id, count = removed.len(), "Deleted expenses");
        let entries: Vec<_> = removed.iter().map(AuditEntry::delete).collect();
        self.record(entries);
        true
    }

    /// Totals, count, average and per-category sums
    pub fn summary(&self) -> ExpenseSummary {
        ExpenseSummary::from_expenses(&self.expenses)
    }

    /// Distinct categories as stored, sorted
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.expenses.iter().map(|e| e.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Count and total for every distinct category
    ///
    /// Categories are listed as stored, but counted case-insensitively, so
    /// "Food" and "food" each report the combined figures.
    pub fn category_stats(&self) -> Vec<CategoryStats> {
        self.categories()
            .into_iter()
            .map(|category| {
                let matching = self.filter_by_category(&category);
                CategoryStats {
                    count: matching.len(),
                    total: matching.iter().map(|e| e.amount).sum(),
                    category,
                }
            })
            .collect()
    }

    /// Expenses in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    fn record(&mut self, entries: Vec<AuditEntry>) {
        if self.audit.is_some() {
            self.unsaved.extend(entries);
        }
    }
}
