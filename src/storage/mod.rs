//! Storage layer for the expense tracker
//!
//! Provides JSON file storage with atomic writes and the in-memory
//! expense store built on it.

pub mod expenses;
pub mod file_io;

pub use expenses::{ExpenseStore, LoadStatus};
pub use file_io::{read_json, write_json_atomic};
