//! Audit logging for the expense tracker
//!
//! Records every expense that is created, imported or deleted in an
//! append-only JSONL file next to the data file. Entries describe saved
//! changes only.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.append(&[AuditEntry::create(&expense)])?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
