//! Vulnbrief CLI entry point
//!
//! Parses arguments, initializes logging and dispatches to subcommand
//! handlers. Handler errors are printed to stderr and mapped to process
//! exit codes via [`CliError::exit_code`].

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for command output
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let writer = OutputWriter::new(cli.output);

    let result: Result<(), CliError> = match cli.command {
        Commands::Summarize(args) => commands::summarize::execute(args, &cli.config, &writer),
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}
