//! Audit entry data structures
//!
//! Defines the structure of audit log entries: which operation happened to
//! which expense, and a snapshot of the record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Expense was entered by the user
    Create,
    /// Expense was removed
    Delete,
    /// Expense came in through a CSV import
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Import => write!(f, "IMPORT"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// ID of the affected expense
    pub expense_id: String,

    /// Description of the expense, for readable output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The record as it was before the operation (deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// The record as it is after the operation (creates and imports)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    fn new(operation: Operation, expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            expense_id: expense.id.to_string(),
            description: Some(expense.description.clone()),
            before: None,
            after: None,
        }
    }

    /// Entry for an expense entered by the user
    pub fn create(expense: &Expense) -> Self {
        Self {
            after: serde_json::to_value(expense).ok(),
            ..Self::new(Operation::Create, expense)
        }
    }

    /// Entry for an expense brought in by an import
    pub fn import(expense: &Expense) -> Self {
        Self {
            after: serde_json::to_value(expense).ok(),
            ..Self::new(Operation::Import, expense)
        }
    }

    /// Entry for a removed expense
    pub fn delete(expense: &Expense) -> Self {
        Self {
            before: serde_json::to_value(expense).ok(),
            ..Self::new(Operation::Delete, expense)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.expense_id
        );

        if let Some(description) = &self.description {
            output.push_str(&format!(" ({})", description));
        }

        output
    }
}
