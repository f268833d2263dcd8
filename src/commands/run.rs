//! Run command implementation
//!
//! This command loads every resource package of a working directory into a
//! new target document and saves the artifact, reporting per-package outcomes.

use std::path::{Path, PathBuf};

use crate::cli::RunArgs;
use crate::config::{ConfigLoader, PipelineConfig};
use crate::domain::RunResult;
use crate::error::{Result, io_error};
use crate::host::FsHost;
use crate::importer::ImportPipeline;
use crate::trace::ConsoleTrace;
use crate::ui::display::display_run_summary;
use crate::ui::{InteractiveProgressReporter, ProgressReporter, SilentProgressReporter};

/// Run the run command
pub fn run(args: RunArgs, verbose: bool) -> Result<()> {
    let working_dir = get_working_dir(args.workdir.clone())?;
    let config = load_config(&working_dir, &args)?;

    tracing::debug!(?config, working_dir = %working_dir.display(), "configuration resolved");

    let host = FsHost::new();
    let mut trace = ConsoleTrace::new();
    let mut progress = create_progress_reporter();

    let result = ImportPipeline::new(Some(&host), &config, &mut trace)
        .with_progress(progress.as_mut())
        .run(&working_dir);

    finish(result, verbose)
}

/// Get the working directory from the CLI argument or the current directory
fn get_working_dir(workdir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match workdir {
        Some(path) => path,
        None => std::env::current_dir()
            .map_err(|e| io_error(format!("Failed to get current directory: {e}")))?,
    };
    // A missing directory is left as given; the pipeline reports it
    Ok(dunce::canonicalize(&path).unwrap_or(path))
}

/// Layer configuration files and command line flags
fn load_config(working_dir: &Path, args: &RunArgs) -> Result<PipelineConfig> {
    let mut config = ConfigLoader::new(working_dir)
        .with_explicit(args.config.clone())
        .load()?;
    config.apply(args.overrides());
    config.validate()?;
    Ok(config)
}

fn create_progress_reporter() -> Box<dyn ProgressReporter> {
    if console::Term::stderr().is_term() {
        Box::new(InteractiveProgressReporter::new())
    } else {
        Box::new(SilentProgressReporter)
    }
}

fn finish(result: RunResult, verbose: bool) -> Result<()> {
    display_run_summary(&result, verbose);
    match result.failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
