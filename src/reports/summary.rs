//! Expense summary report
//!
//! Totals, averages and a per-category breakdown over a set of expenses.

use std::collections::BTreeMap;

use crate::models::{Amount, Expense};

/// Aggregate figures for a set of expenses
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseSummary {
    /// Sum of all amounts
    pub total: Amount,
    /// Number of expenses
    pub count: usize,
    /// total / count, or zero for an empty set
    pub average: Amount,
    /// Summed amount per category, keyed by category exactly as stored
    pub category_totals: BTreeMap<String, Amount>,
}

/// One row of the per-category breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: Amount,
    /// Share of the overall total, in percent
    pub percentage: f64,
}

/// Count and total for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub category: String,
    pub count: usize,
    pub total: Amount,
}

impl ExpenseSummary {
    /// Compute the summary of a slice of expenses
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        if expenses.is_empty() {
            return Self::default();
        }

        let mut category_totals: BTreeMap<String, Amount> = BTreeMap::new();
        for expense in expenses {
            *category_totals.entry(expense.category.clone()).or_default() += expense.amount;
        }

        // Summed from the per-category figures so the two always agree exactly
        let total: Amount = category_totals.values().copied().sum();
        let count = expenses.len();

        Self {
            total,
            count,
            average: Amount::new(total.value() / count as f64),
            category_totals,
        }
    }

    /// Categories ordered by total, largest first
    pub fn by_category_desc(&self) -> Vec<CategoryShare> {
        let mut shares: Vec<_> = self
            .category_totals
            .iter()
            .map(|(category, total)| CategoryShare {
                category: category.clone(),
                total: *total,
                percentage: total.percentage_of(self.total),
            })
            .collect();

        shares.sort_by(|a, b| b.total.value().total_cmp(&a.total.value()));
        shares
    }

    /// Format the summary for terminal output
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Total Expenses: {}\n",
            self.total.format_with_symbol(symbol)
        ));
        output.push_str(&format!("Number of Expenses: {}\n", self.count));
        output.push_str(&format!(
            "Average Expense: {}\n",
            self.average.format_with_symbol(symbol)
        ));

        if !self.category_totals.is_empty() {
            output.push_str("\nBy Category:\n");
            for share in self.by_category_desc() {
                output.push_str(&format!(
                    "  {}: {} ({:.1}%)\n",
                    share.category,
                    share.total.format_with_symbol(symbol),
                    share.percentage
                ));
            }
        }

        output
    }
}
