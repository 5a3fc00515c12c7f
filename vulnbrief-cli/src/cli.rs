//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Vulnbrief -- vulnerability scan report summarizer.
///
/// Use `vulnbrief <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "vulnbrief", version, about, long_about = None)]
pub struct Cli {
    /// Path to the vulnbrief.toml configuration file.
    #[arg(short, long, default_value = "vulnbrief.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a one-shot scan result summarization.
    Summarize(SummarizeArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- summarize ----

/// Summarize a vulnerability scan result into a report file.
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Scan result input path (overrides the configured input_path).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Report output path (overrides the configured output_path).
    #[arg(long)]
    pub report_file: Option<PathBuf>,

    /// Maximum number of spotlight entries per project.
    #[arg(long)]
    pub spotlight_limit: Option<usize>,

    /// Print the report to stdout instead of writing the output file.
    #[arg(long)]
    pub stdout: bool,
}

// ---- config ----

/// Manage vulnbrief configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, report).
        #[arg(long)]
        section: Option<String>,
    },
}
