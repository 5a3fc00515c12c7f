//! CLI error types and exit codes
//!
//! Error types for command execution with structured exit codes:
//!
//! | Exit code | Meaning |
//! |-----------|---------|
//! | 0 | Success |
//! | 1 | Command execution failure |
//! | 2 | Configuration error |
//! | 10 | I/O error |

use thiserror::Error;
use vulnbrief_core::error::VulnbriefError;
use vulnbrief_report::ReportError;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Command execution failure.
    #[error("command failed: {0}")]
    Command(String),

    /// Summarization pipeline failure.
    #[error("summarize failed: {0}")]
    Summary(String),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error.
    #[error(transparent)]
    Core(#[from] VulnbriefError),
}

impl From<ReportError> for CliError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Config { .. } => Self::Config(err.to_string()),
            other => Self::Summary(other.to_string()),
        }
    }
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(VulnbriefError::Config(_)) => 2,
            Self::Io(_) => 10,
            _ => 1,
        }
    }
}
