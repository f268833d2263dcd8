//! family-loader command line entry point

use clap::Parser;
use tracing_subscriber::EnvFilter;

use family_loader::cli::{Cli, Commands};
use family_loader::commands;

/// Diagnostics go to stderr; `RUST_LOG` overrides the default filter
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "family_loader=debug"
    } else {
        "family_loader=warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args, cli.verbose),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
