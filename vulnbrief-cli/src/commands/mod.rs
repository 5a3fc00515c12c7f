//! CLI subcommand handlers

pub mod config;
pub mod summarize;
