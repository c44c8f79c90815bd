//! Expense CLI commands
//!
//! Implements the one-shot subcommands and hands off to the interactive menu.

use std::io;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_category_list, format_expense_details, format_expense_list, format_header,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::NewExpense;
use crate::services::ImportService;
use crate::storage::ExpenseStore;

use super::export::run_export;
use super::import::import_report;
use super::interactive::InteractiveSession;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// Amount (e.g., "50" or "12.75")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category name
        category: String,
        /// Short description
        description: String,
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Only show this category (case-insensitive)
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long, requires = "from")]
        to: Option<String>,
    },

    /// Delete an expense by ID
    Delete {
        /// Expense ID
        id: String,
    },

    /// Show totals and the per-category breakdown
    Summary,

    /// List categories with counts and totals
    Categories,

    /// Add expenses from a CSV file
    Import {
        /// Path to CSV file
        file: PathBuf,
    },

    /// Save expenses to a CSV file
    Export {
        /// Output path (defaults to a dated file name)
        file: Option<PathBuf>,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Run the menu-driven interface
    Interactive,
}

/// Handle an expense command
pub fn handle_expense_command(
    store: &mut ExpenseStore,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            description,
            date,
        } => {
            let input = NewExpense::parse(&amount, &category, &description, date.as_deref())?;
            let expense = store.add_new(input);
            store.save()?;

            println!("Expense added successfully!");
            print!("{}", format_expense_details(&expense, symbol));
        }

        ExpenseCommands::List { category, from, to } => {
            let expenses: Vec<_> = store
                .list_all()
                .into_iter()
                .filter(|e| category.as_deref().map_or(true, |c| e.in_category(c)))
                .filter(|e| match (&from, &to) {
                    (Some(start), Some(end)) => e.in_date_range(start, end),
                    _ => true,
                })
                .collect();

            print!("{}", format_expense_list(&expenses, symbol));
        }

        ExpenseCommands::Delete { id } => {
            if !store.delete(&id) {
                return Err(ExpenseError::expense_not_found(id));
            }
            store.save()?;
            println!("Expense deleted successfully!");
        }

        ExpenseCommands::Summary => {
            print!("{}", format_header("Expense Summary"));
            print!("{}", store.summary().format_terminal(symbol));
        }

        ExpenseCommands::Categories => {
            print!("{}", format_category_list(&store.category_stats(), symbol));
        }

        ExpenseCommands::Import { file } => {
            let outcome = ImportService::new(store).import_file(&file);
            print!("{}", import_report(&outcome));
        }

        ExpenseCommands::Export { file } => {
            print!("{}", run_export(store, settings, file));
        }

        ExpenseCommands::History { limit } => {
            let Some(audit) = store.audit() else {
                println!("No audit log configured.");
                return Ok(());
            };

            let entries = audit.read_recent(limit)?;
            if entries.is_empty() {
                println!("No history recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }

        ExpenseCommands::Interactive => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            InteractiveSession::new(store, settings, stdin.lock(), stdout.lock()).run()?;
        }
    }

    Ok(())
}
