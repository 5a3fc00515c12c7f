//! `vulnbrief summarize` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use vulnbrief_core::config::VulnbriefConfig;
use vulnbrief_report::{DataAvailability, ReportConfig, ScanSummarizer, render};

use crate::cli::SummarizeArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `summarize` command.
///
/// Loads the configuration, applies CLI overrides, runs the one-shot
/// load → normalize → aggregate → render pipeline and either writes the
/// report file or prints it to stdout.
///
/// # Errors
///
/// Returns `CliError::Config` for invalid configuration and
/// `CliError::Summary` if the report file cannot be written. Input-side
/// problems (missing file, unparseable content) are not errors; they
/// degrade to a fallback report.
pub fn execute(
    args: SummarizeArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let core_config = load_config(config_path)?;
    let mut config = ReportConfig::from_core(&core_config.report);

    // CLI arguments take precedence over file and env settings
    if let Some(input) = &args.input {
        config.input_path = input.to_string_lossy().to_string();
    }
    if let Some(report_file) = &args.report_file {
        config.output_path = report_file.to_string_lossy().to_string();
    }
    if let Some(limit) = args.spotlight_limit {
        config.spotlight_limit = limit;
    }

    info!(
        input = %config.input_path,
        output = %config.output_path,
        stdout = args.stdout,
        "running summarization"
    );

    let summarizer = ScanSummarizer::new(config)?;
    let summary = summarizer.summarize_path();

    let report = SummarizeReport {
        input: summarizer.config().input_path.clone(),
        written_to: None,
        total_projects: summary.total_projects,
        projects_with_vulnerabilities: summary.projects_with_vulnerabilities,
        total_vulnerabilities: summary.total_vulnerabilities,
        verdict: summary.verdict.to_string(),
        data_availability: availability_label(summary.availability, summary.skipped_lines),
        report_text: None,
    };

    let report = if args.stdout {
        SummarizeReport {
            report_text: Some(render(&summary)),
            ..report
        }
    } else {
        let written = summarizer.run()?;
        SummarizeReport {
            written_to: Some(written.display().to_string()),
            ..report
        }
    };

    writer.render(&report)?;
    Ok(())
}

/// Load the core configuration, falling back to defaults when the file is absent.
///
/// Env overrides still apply in the fallback case, so CI can run without
/// a configuration file at all.
fn load_config(config_path: &Path) -> Result<VulnbriefConfig, CliError> {
    if config_path.exists() {
        Ok(VulnbriefConfig::load(config_path)?)
    } else {
        let mut config = VulnbriefConfig::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}

fn availability_label(availability: DataAvailability, skipped_lines: usize) -> String {
    match availability {
        DataAvailability::Full => "full".to_owned(),
        DataAvailability::Partial => format!("partial ({} lines skipped)", skipped_lines),
        DataAvailability::Empty => "none".to_owned(),
        DataAvailability::Unavailable => "none (input could not be parsed)".to_owned(),
    }
}

/// Summarization result report.
///
/// The `report_text` field carries the full rendered report for `--stdout`
/// and is skipped during JSON serialization (the JSON payload carries the
/// structured fields instead).
#[derive(Serialize)]
pub struct SummarizeReport {
    /// Scan result input path
    pub input: String,
    /// Report file path (None when printed to stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_to: Option<String>,
    /// Number of projects in the scan input
    pub total_projects: usize,
    /// Number of projects with at least one finding
    pub projects_with_vulnerabilities: usize,
    /// Total finding count across all projects
    pub total_vulnerabilities: usize,
    /// Overall risk verdict
    pub verdict: String,
    /// Input data availability
    pub data_availability: String,
    /// Full rendered report text (stdout mode only)
    #[serde(skip)]
    pub report_text: Option<String>,
}

impl Render for SummarizeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref text) = self.report_text {
            write!(w, "{}", text)?;
            return Ok(());
        }

        writeln!(w, "Scan Summary: {}", self.input.bold())?;
        writeln!(w, "  Projects: {}", self.total_projects)?;
        writeln!(
            w,
            "  Projects with Vulnerabilities: {}",
            self.projects_with_vulnerabilities
        )?;
        writeln!(w, "  Vulnerabilities: {}", self.total_vulnerabilities)?;

        let verdict = match self.verdict.as_str() {
            "critical risk" | "high risk" => self.verdict.red().bold(),
            "medium risk" => self.verdict.yellow().bold(),
            _ => self.verdict.green().bold(),
        };
        writeln!(w, "  Overall Risk: {}", verdict)?;
        writeln!(w, "  Data Availability: {}", self.data_availability)?;

        if let Some(ref path) = self.written_to {
            writeln!(w, "  Report written to: {}", path.bold())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn report() -> SummarizeReport {
        SummarizeReport {
            input: "scan-results.json".to_owned(),
            written_to: Some("reports/scan-summary.txt".to_owned()),
            total_projects: 2,
            projects_with_vulnerabilities: 1,
            total_vulnerabilities: 3,
            verdict: "high risk".to_owned(),
            data_availability: "full".to_owned(),
            report_text: None,
        }
    }

    #[test]
    fn test_summarize_report_render_text() {
        let mut buffer = Vec::new();
        report()
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Scan Summary: scan-results.json"));
        assert!(output.contains("Projects: 2"));
        assert!(output.contains("Vulnerabilities: 3"));
        assert!(output.contains("high risk"));
        assert!(output.contains("Report written to:"));
    }

    #[test]
    fn test_summarize_report_stdout_mode_renders_full_report() {
        let payload = SummarizeReport {
            written_to: None,
            report_text: Some("# Vulnerability Scan Summary\n".to_owned()),
            ..report()
        };

        let mut buffer = Vec::new();
        payload
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("# Vulnerability Scan Summary"));
        assert!(
            !output.contains("Scan Summary: scan-results.json"),
            "stdout mode should emit the report body only"
        );
    }

    #[test]
    fn test_summarize_report_json_serialization() {
        let json = serde_json::to_string(&report()).expect("JSON serialization should succeed");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("should parse JSON");

        assert_eq!(parsed["input"].as_str(), Some("scan-results.json"));
        assert_eq!(parsed["total_projects"].as_u64(), Some(2));
        assert_eq!(parsed["verdict"].as_str(), Some("high risk"));
        assert!(
            parsed.get("report_text").is_none(),
            "report_text should be skipped"
        );
    }

    #[test]
    fn test_availability_label_variants() {
        assert_eq!(availability_label(DataAvailability::Full, 0), "full");
        assert_eq!(
            availability_label(DataAvailability::Partial, 2),
            "partial (2 lines skipped)"
        );
        assert_eq!(availability_label(DataAvailability::Empty, 0), "none");
        assert_eq!(
            availability_label(DataAvailability::Unavailable, 0),
            "none (input could not be parsed)"
        );
    }

    #[test]
    fn test_execute_writes_report_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("scan.json");
        std::fs::write(&input, r#"[{"projectName": "app", "vulnerabilities": []}]"#)
            .expect("write input");
        let output = dir.path().join("summary.txt");

        let args = SummarizeArgs {
            input: Some(input),
            report_file: Some(output.clone()),
            spotlight_limit: None,
            stdout: false,
        };
        let writer = OutputWriter::new(OutputFormat::Text);
        execute(args, Path::new("/nonexistent/vulnbrief.toml"), &writer)
            .expect("summarize should succeed");

        let text = std::fs::read_to_string(&output).expect("report file exists");
        assert!(text.contains("## Project: app"));
    }

    #[test]
    fn test_execute_rejects_invalid_spotlight_limit() {
        let args = SummarizeArgs {
            input: None,
            report_file: None,
            spotlight_limit: Some(0),
            stdout: true,
        };
        let writer = OutputWriter::new(OutputFormat::Text);
        let result = execute(args, Path::new("/nonexistent/vulnbrief.toml"), &writer);
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
