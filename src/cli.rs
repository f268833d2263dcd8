//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{ConfigOverrides, DuplicatePolicy};
use crate::domain::UnitSystem;

/// family-loader - headless content definition loader
///
/// Loads every resource package of a working directory into one target document
/// and saves it as a single artifact.
#[derive(Parser, Debug)]
#[command(
    name = "family-loader",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Headless loader merging resource packages into one target document",
    long_about = "family-loader discovers resource packages in a working directory, merges \
                  the content definition of each into a single target document, places one \
                  instance per variant, and saves the document as one artifact file.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  family-loader run\n    \
                  family-loader run ./job --units imperial\n    \
                  family-loader run ./job --pattern 'Doors/**/*.pkg' --output doors.json\n    \
                  family-loader completions --shell zsh"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load resource packages into a new target document
    Run(RunArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Load packages from the current directory:\n    family-loader run\n\n\
                  Load packages from a job directory:\n    family-loader run ./job\n\n\
                  Use a separate configuration file:\n    family-loader run ./job --config ci.yaml\n\n\
                  Reproduce the single-package automation:\n    family-loader run ./job --first-only")]
pub struct RunArgs {
    /// Working directory holding the resource packages (defaults to current directory)
    pub workdir: Option<PathBuf>,

    /// Artifact path, relative to the working directory
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Configuration file used instead of <WORKDIR>/family-loader.yaml
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Glob selecting resource packages
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Unit system of the target document (metric, imperial)
    #[arg(long, value_name = "SYSTEM")]
    pub units: Option<UnitSystem>,

    /// Fail the merge of a definition that is already loaded
    #[arg(long)]
    pub reject_duplicates: bool,

    /// Process only the first discovered resource package
    #[arg(long)]
    pub first_only: bool,
}

impl RunArgs {
    /// Configuration layer set by command line flags
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output_file: self.output.clone(),
            pattern: self.pattern.clone(),
            unit_system: self.units,
            on_duplicate: self.reject_duplicates.then_some(DuplicatePolicy::Reject),
            first_only: self.first_only.then_some(true),
            ..ConfigOverrides::default()
        }
    }
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long, value_enum, ignore_case = true)]
    pub shell: Shell,
}
