#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`ReportError`)
//! - [`config`]: Engine configuration (`ReportConfig`, builder)
//! - [`loader`]: Multi-shape input loading (`LoadOutcome`, `DataAvailability`)
//! - [`normalize`]: Canonical records (`ProjectReport`, `VulnerabilityRecord`)
//! - [`aggregate`]: Summary statistics (`SummaryDocument`, `RiskVerdict`)
//! - [`render`]: Deterministic report text rendering
//! - [`summarizer`]: Pipeline orchestrator (`ScanSummarizer`, builder)
//!
//! # Architecture
//!
//! ```text
//! input (file / str) --> Loader --> Vec<RawScanDocument>
//!                                        |
//!                                    Normalizer
//!                                        |
//!                                  Vec<ProjectReport>
//!                                        |
//!                                    Aggregator
//!                                        |
//!                                  SummaryDocument --> Reporter --> text
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod render;
pub mod summarizer;

// --- Public API Re-exports ---

// Orchestrator
pub use summarizer::{ScanSummarizer, ScanSummarizerBuilder};

// Configuration
pub use config::{ReportConfig, ReportConfigBuilder};

// Error
pub use error::ReportError;

// Loader
pub use loader::{DataAvailability, LoadOutcome, load_path, load_str};

// Normalizer
pub use normalize::{ProjectReport, RemediationStats, VulnerabilityRecord, normalize};

// Aggregator
pub use aggregate::{ProjectSummary, RiskVerdict, SummaryDocument, aggregate};

// Reporter
pub use render::render;
