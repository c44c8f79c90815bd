use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{handle_expense_command, ExpenseCommands};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::storage::{ExpenseStore, LoadStatus};

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Personal expense tracker",
    long_about = "Track personal expenses from the command line. Add them by hand \
                  or from CSV, review them by category and export them back to CSV. \
                  Run without a subcommand for the interactive menu."
)]
struct Cli {
    /// Path to the expenses JSON file
    #[arg(short = 'f', long, global = true)]
    data_file: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<ExpenseCommands>,
}

fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "expense_tracker=debug"
    } else {
        "expense_tracker=error"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = ExpensePaths::new(cli.data_file);
    paths.ensure_directories()?;
    let settings = Settings::load(&paths).unwrap_or_else(|e| {
        eprintln!("Warning: {}; using default settings", e);
        Settings::default()
    });

    let (mut store, status) = ExpenseStore::open(&paths);
    if let LoadStatus::Recovered { reason } = &status {
        eprintln!(
            "Warning: could not load {} ({}); starting with no expenses",
            paths.data_file().display(),
            reason
        );
    }

    let command = cli.command.unwrap_or(ExpenseCommands::Interactive);
    handle_expense_command(&mut store, &settings, command)?;

    Ok(())
}
