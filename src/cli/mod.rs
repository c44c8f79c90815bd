//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the expense store.

pub mod expense;
pub mod export;
pub mod import;
pub mod interactive;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::run_export;
pub use import::import_report;
pub use interactive::InteractiveSession;
