//! CLI reporting for CSV import
//!
//! Turns an import outcome into the lines shown to the user. Failures are
//! reported, never raised.

use crate::services::{ImportOutcome, SkippedRow};

/// Describe an import outcome for the terminal
pub fn import_report(outcome: &ImportOutcome) -> String {
    let mut output = String::new();

    let skipped: &[SkippedRow] = match outcome {
        ImportOutcome::Imported { skipped, .. } | ImportOutcome::NoValidRows { skipped } => {
            skipped.as_slice()
        }
        _ => &[],
    };
    for row in skipped {
        output.push_str(&format!(" Skipping invalid amount: {}\n", row.amount));
    }

    match outcome {
        ImportOutcome::Imported { added, .. } => {
            output.push_str(&format!("Added {} expenses successfully!\n", added));
        }
        ImportOutcome::NoValidRows { .. } => {
            output.push_str("No valid expenses found in CSV file\n");
        }
        ImportOutcome::SaveFailed { added, reason } => {
            output.push_str(&format!(
                " Failed to save imported expenses ({} added in memory): {}\n",
                added, reason
            ));
        }
        ImportOutcome::Failed(e) => {
            output.push_str(&format!(" {}\n", e));
        }
    }

    output
}
