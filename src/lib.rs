//! Expense Tracker - a small personal expense tracker for the terminal
//!
//! Expenses live in a single JSON file. They can be added by hand or from
//! CSV, listed, deleted, summarized by category and exported back to CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path and settings management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, ids, amounts)
//! - `storage`: JSON file storage and the expense store
//! - `audit`: Audit logging system
//! - `reports`: Summary and per-category statistics
//! - `services`: CSV import
//! - `export`: CSV export
//! - `display`: Terminal formatting
//! - `cli`: Subcommands and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::ExpensePaths;
//! use expense_tracker::storage::ExpenseStore;
//!
//! let paths = ExpensePaths::new(None);
//! let (store, status) = ExpenseStore::open(&paths);
//! println!("{}", store.summary().format_terminal("₹"));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
