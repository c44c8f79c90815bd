//! Export module for the expense tracker
//!
//! Provides CSV export of the full expense list.

pub mod csv;

pub use self::csv::{export_expenses_csv, export_to_file, ExportOutcome, CSV_COLUMNS};
