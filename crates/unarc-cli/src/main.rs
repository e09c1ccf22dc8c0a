//! Unarc CLI - command-line front end for the unarc archive engine.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.quiet && !cli.json;

    match &cli.command {
        cli::Commands::Extract(args) => commands::extract::execute(args, &*formatter, show_progress),
        cli::Commands::Create(args) => commands::create::execute(args, &*formatter),
        cli::Commands::List(args) => commands::list::execute(args, &*formatter),
    }
}

/// Sends engine diagnostics to stderr so they never mix with command
/// output. `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose {
        "unarc_core=debug,unarc=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
