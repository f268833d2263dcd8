//! Display functions for run results
//!
//! The summary goes to stderr; stdout belongs to the trace lines.

use console::Style;

use crate::domain::{MergeOutcome, RunResult};

macro_rules! display_opt_field {
    ($label:expr, $value:expr) => {
        if let Some(ref v) = $value {
            eprintln!("    {} {}", Style::new().bold().apply_to($label), v);
        }
    };
}

/// Display the end-of-run summary
pub fn display_run_summary(result: &RunResult, verbose: bool) {
    if result.outcomes.is_empty() {
        return;
    }

    eprintln!();
    eprintln!("{}", Style::new().bold().apply_to("Resource packages:"));
    for outcome in &result.outcomes {
        display_outcome(outcome, verbose);
    }

    let failed = result.outcomes.len() - result.merged_count;
    eprintln!();
    if let Some(ref artifact) = result.artifact_path {
        eprintln!(
            "{} {} merged, {} failed, saved to {}",
            Style::new().green().bold().apply_to("✔"),
            result.merged_count,
            failed,
            artifact.display()
        );
    } else {
        eprintln!(
            "{} {} merged, {} failed, nothing saved",
            Style::new().red().bold().apply_to("✘"),
            result.merged_count,
            failed
        );
    }
}

fn display_outcome(outcome: &MergeOutcome, verbose: bool) {
    if outcome.success {
        eprintln!(
            "  {} {} ({} instance{})",
            Style::new().green().apply_to("✔"),
            outcome.display_path,
            outcome.instance_count,
            if outcome.instance_count == 1 { "" } else { "s" }
        );
        if verbose {
            display_opt_field!("Definition:", outcome.definition);
            display_opt_field!("Digest:", outcome.digest);
        }
    } else {
        eprintln!(
            "  {} {} {}",
            Style::new().red().apply_to("✘"),
            outcome.display_path,
            Style::new().dim().apply_to(outcome.error_kind.unwrap_or("Failure"))
        );
        if verbose {
            display_opt_field!("Error:", outcome.error_detail);
        }
    }
}
