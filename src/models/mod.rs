//! Core data models for the expense tracker
//!
//! This module contains the data structures of the tracking domain: the
//! expense record itself, its identifier, and the amount type.

pub mod expense;
pub mod ids;
pub mod money;

pub use expense::{validate_date, validate_expense, Expense, NewExpense, ValidationErrors};
pub use ids::ExpenseId;
pub use money::{Amount, AmountParseError};
