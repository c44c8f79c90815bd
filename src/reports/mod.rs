//! Reports module for the expense tracker
//!
//! Aggregate views over the stored expenses.

pub mod summary;

pub use summary::{CategoryShare, CategoryStats, ExpenseSummary};
