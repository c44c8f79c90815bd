//! Expense display formatting
//!
//! Formats expenses and category listings for terminal output.

use crate::models::Expense;
use crate::reports::CategoryStats;

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("  ID: {}\n", expense.id));
    output.push_str(&format!(
        "  Amount: {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Category: {}\n", expense.category));
    output.push_str(&format!("  Description: {}\n", expense.description));
    output.push_str(&format!("  Date: {}\n", expense.date));

    output
}

/// Format a numbered list of expenses
pub fn format_expense_list(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();

    for (i, expense) in expenses.iter().enumerate() {
        output.push_str(&format!("\n{}. {}\n", i + 1, expense.description));
        output.push_str(&format!("   ID: {}\n", expense.id));
        output.push_str(&format!(
            "   Amount: {}\n",
            expense.amount.format_with_symbol(symbol)
        ));
        output.push_str(&format!("   Category: {}\n", expense.category));
        output.push_str(&format!("   Date: {}\n", expense.date));
        output.push_str(&format!(
            "   Created: {}\n",
            expense.created_at.format("%Y-%m-%d")
        ));
    }

    output
}

/// One line per expense, for picking an id to delete
pub fn format_delete_candidates(expenses: &[Expense], limit: usize, symbol: &str) -> String {
    let mut output = String::new();

    for (i, expense) in expenses.iter().take(limit).enumerate() {
        output.push_str(&format!(
            "  {}. {} - {} ({}) [ID: {}]\n",
            i + 1,
            expense.description,
            expense.amount.format_with_symbol(symbol),
            expense.date,
            expense.id
        ));
    }

    if expenses.len() > limit {
        output.push_str(&format!("  ... and {} more\n", expenses.len() - limit));
    }

    output
}

/// Format per-category counts and totals
pub fn format_category_list(stats: &[CategoryStats], symbol: &str) -> String {
    if stats.is_empty() {
        return "No categories found.\n".to_string();
    }

    stats
        .iter()
        .map(|s| {
            format!(
                "  {}: {} expenses, {}\n",
                s.category,
                s.count,
                s.total.format_with_symbol(symbol)
            )
        })
        .collect()
}

/// A section header
pub fn format_header(title: &str) -> String {
    let rule = "=".repeat(50);
    format!("\n{}\n  {}  \n{}\n", rule, title, rule)
}
