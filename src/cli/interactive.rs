//! Menu-driven interactive mode
//!
//! A prompt loop over any reader/writer pair. Errors inside a step are
//! printed and the loop carries on; only "Exit" or end of input stops it.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::Settings;
use crate::display::{
    format_delete_candidates, format_expense_details, format_expense_list, format_header,
};
use crate::error::ExpenseResult;
use crate::models::NewExpense;
use crate::services::ImportService;
use crate::storage::ExpenseStore;

use super::export::run_export;
use super::import::import_report;

/// Whether the session should keep going after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// An interactive session bound to a store
pub struct InteractiveSession<'a, R, W> {
    store: &'a mut ExpenseStore,
    settings: &'a Settings,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> InteractiveSession<'a, R, W> {
    pub fn new(store: &'a mut ExpenseStore, settings: &'a Settings, input: R, output: W) -> Self {
        Self {
            store,
            settings,
            input,
            output,
        }
    }

    /// Run the main menu until the user exits or input ends
    pub fn run(&mut self) -> ExpenseResult<()> {
        loop {
            write!(self.output, "{}", format_header("Personal Expense Tracker"))?;
            writeln!(self.output, "What would you like to do?")?;
            writeln!(self.output, "  1. Add expense")?;
            writeln!(self.output, "  2. View expenses")?;
            writeln!(self.output, "  3. Track budget")?;
            writeln!(self.output, "  4. Save expenses")?;
            writeln!(self.output, "  5. Exit")?;

            let Some(choice) = self.prompt("\nEnter your choice (1-5): ")? else {
                break;
            };

            let step = match choice.as_str() {
                "1" => self.add_menu(),
                "2" => self.view_expenses(),
                "3" => self.show_summary(),
                "4" => self.export_prompt(),
                "5" => break,
                _ => self.say("Invalid choice. Please try again."),
            };

            match step {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => writeln!(self.output, "An error occurred: {}", e)?,
            }

            if self.prompt("\nPress Enter to continue...")?.is_none() {
                break;
            }
        }

        writeln!(self.output, "\nGoodbye!")?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> ExpenseResult<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt inside a step; end of input cancels the step and the session
    fn ask(&mut self, text: &str) -> ExpenseResult<Result<String, Flow>> {
        match self.prompt(text)? {
            Some(answer) => Ok(Ok(answer)),
            None => {
                writeln!(self.output, "\nOperation cancelled")?;
                Ok(Err(Flow::Exit))
            }
        }
    }

    fn say(&mut self, message: &str) -> ExpenseResult<Flow> {
        writeln!(self.output, "{}", message)?;
        Ok(Flow::Continue)
    }

    fn add_menu(&mut self) -> ExpenseResult<Flow> {
        write!(self.output, "{}", format_header("Add Expense"))?;
        writeln!(self.output, "How would you like to add expenses?")?;
        writeln!(self.output, "  1. Add manually")?;
        writeln!(self.output, "  2. Add from CSV file")?;
        writeln!(self.output, "  3. Back to main menu")?;

        let choice = match self.ask("\nEnter your choice (1-3): ")? {
            Ok(choice) => choice,
            Err(flow) => return Ok(flow),
        };

        match choice.as_str() {
            "1" => self.add_manually(),
            "2" => self.import_prompt(),
            "3" => Ok(Flow::Continue),
            _ => self.say("Invalid choice. Please try again."),
        }
    }

    fn add_manually(&mut self) -> ExpenseResult<Flow> {
        write!(self.output, "{}", format_header("Add Expense Manually"))?;

        let symbol = self.settings.currency_symbol.clone();
        let mut answers = Vec::with_capacity(4);
        for question in [
            format!("Enter amount ({}): ", symbol),
            "Enter category: ".to_string(),
            "Enter description: ".to_string(),
            "Enter date (YYYY-MM-DD) or press Enter for today: ".to_string(),
        ] {
            match self.ask(&question)? {
                Ok(answer) => answers.push(answer),
                Err(flow) => return Ok(flow),
            }
        }

        let parsed = NewExpense::parse(
            &answers[0],
            &answers[1],
            &answers[2],
            Some(answers[3].as_str()),
        );
        let input = match parsed {
            Ok(input) => input,
            Err(errors) => {
                writeln!(self.output, "Validation errors:")?;
                for error in errors.iter() {
                    writeln!(self.output, "  - {}", error)?;
                }
                return Ok(Flow::Continue);
            }
        };

        let expense = self.store.add_new(input);
        match self.store.save() {
            Ok(()) => {
                writeln!(self.output, " Expense added successfully!")?;
                write!(self.output, "{}", format_expense_details(&expense, &symbol))?;
            }
            Err(e) => writeln!(self.output, " Failed to save expense: {}", e)?,
        }

        Ok(Flow::Continue)
    }

    fn import_prompt(&mut self) -> ExpenseResult<Flow> {
        let filename = match self.ask("Enter CSV filename to add from: ")? {
            Ok(filename) => filename,
            Err(flow) => return Ok(flow),
        };

        if filename.is_empty() {
            return self.say("Filename is required for adding from CSV");
        }

        let outcome = ImportService::new(self.store).import_file(&PathBuf::from(filename));
        write!(self.output, "{}", import_report(&outcome))?;
        Ok(Flow::Continue)
    }

    fn view_expenses(&mut self) -> ExpenseResult<Flow> {
        let expenses = self.store.list_all();
        if expenses.is_empty() {
            return self.say("No expenses found.");
        }

        write!(self.output, "{}", format_header("View Expenses"))?;
        write!(
            self.output,
            "{}",
            format_expense_list(&expenses, &self.settings.currency_symbol)
        )?;

        writeln!(self.output, "\nOptions:")?;
        writeln!(self.output, "  1. Delete an expense")?;
        writeln!(self.output, "  2. Back to main menu")?;

        let choice = match self.ask("\nEnter your choice (1-2): ")? {
            Ok(choice) => choice,
            Err(flow) => return Ok(flow),
        };

        match choice.as_str() {
            "1" => self.delete_prompt(),
            "2" => Ok(Flow::Continue),
            _ => self.say("Invalid choice."),
        }
    }

    fn delete_prompt(&mut self) -> ExpenseResult<Flow> {
        let expenses = self.store.list_all();
        if expenses.is_empty() {
            return self.say("No expenses found.");
        }

        write!(self.output, "{}", format_header("Delete Expense"))?;
        writeln!(self.output, "Available expenses:")?;
        write!(
            self.output,
            "{}",
            format_delete_candidates(
                &expenses,
                self.settings.delete_preview_limit,
                &self.settings.currency_symbol
            )
        )?;

        let id = match self.ask("\nEnter expense ID to delete: ")? {
            Ok(id) => id,
            Err(flow) => return Ok(flow),
        };

        if !self.store.delete(&id) {
            return self.say(" Expense not found");
        }

        match self.store.save() {
            Ok(()) => self.say("Expense deleted successfully!"),
            Err(e) => self.say(&format!(" Failed to save changes: {}", e)),
        }
    }

    fn show_summary(&mut self) -> ExpenseResult<Flow> {
        write!(self.output, "{}", format_header("Track Budget"))?;
        let summary = self.store.summary();
        write!(
            self.output,
            "{}",
            summary.format_terminal(&self.settings.currency_symbol)
        )?;
        Ok(Flow::Continue)
    }

    fn export_prompt(&mut self) -> ExpenseResult<Flow> {
        let filename =
            match self.ask("Enter CSV filename to save to (or press Enter for default): ")? {
                Ok(filename) => filename,
                Err(flow) => return Ok(flow),
            };

        let file = (!filename.is_empty()).then(|| PathBuf::from(filename));
        let message = run_export(self.store, self.settings, file);
        write!(self.output, "{}", message)?;
        Ok(Flow::Continue)
    }
}
