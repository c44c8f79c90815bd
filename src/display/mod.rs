//! Display formatting for terminal output

pub mod expense;

pub use expense::{
    format_category_list, format_delete_candidates, format_expense_details, format_expense_list,
    format_header,
};
