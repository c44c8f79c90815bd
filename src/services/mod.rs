//! Service layer for the expense tracker
//!
//! Operations that span the store and external files.

pub mod import;

pub use import::{ImportError, ImportOutcome, ImportService, ParsedImport, SkippedRow};
