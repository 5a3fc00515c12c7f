//! 파이프라인 통합 테스트
//!
//! load → normalize → aggregate → render 전체 경로의 계약 속성을 검증합니다:
//! 심각도 합계 불변식, 대체 보고서, NDJSON 복구, 스포트라이트 안정 정렬,
//! 바이트 단위 멱등성, 구체 시나리오.

use vulnbrief_report::{
    DataAvailability, ReportConfigBuilder, RiskVerdict, ScanSummarizer, aggregate, load_str,
    normalize, render,
};

fn summarizer() -> ScanSummarizer {
    ScanSummarizer::builder().build().expect("default config")
}

fn pipeline(input: &str) -> String {
    summarizer().summarize_str(input)
}

// =============================================================================
// 심각도 합계 불변식
// =============================================================================

#[test]
fn severity_bucket_sum_equals_total_at_both_levels() {
    let inputs = [
        r#"[{"vulnerabilities": [{"severity": "critical"}, {"severity": "high"}]}]"#,
        r#"[{"vulnerabilities": [{"severity": "HIGH"}, {"severity": "bogus"}, {}]},
            {"vulnerabilities": [{"severity": "low"}, {"severity": "medium"}]}]"#,
        r#"[{"vulnerabilities": []}]"#,
        r#"{"vulnerabilities": [{"severity": "med"}]}"#,
    ];

    for input in inputs {
        let summary = summarizer().summarize_document(input);
        assert_eq!(
            summary.severity_counts.total(),
            summary.total_vulnerabilities,
            "global invariant violated for input: {input}"
        );
        for project in &summary.projects {
            assert_eq!(
                project.report.severity_counts.total(),
                project.report.vulnerabilities.len(),
                "project invariant violated for input: {input}"
            );
        }
    }
}

#[test]
fn unrecognized_severity_is_counted_not_dropped() {
    let summary = summarizer().summarize_document(
        r#"[{"vulnerabilities": [{"severity": "negligible"}, {"severity": "high"}]}]"#,
    );
    assert_eq!(summary.total_vulnerabilities, 2);
    assert_eq!(summary.severity_counts.unknown, 1);
    assert_eq!(summary.severity_counts.high, 1);
}

// =============================================================================
// 대체 보고서 경로
// =============================================================================

#[test]
fn empty_and_whitespace_inputs_yield_identical_fixed_no_data_report() {
    let from_empty = pipeline("");
    let from_whitespace = pipeline("   \n\t\n  ");
    assert_eq!(from_empty, from_whitespace);
    assert!(from_empty.contains("No scan data was available"));
    assert!(from_empty.contains("- Total Projects Scanned: 0"));
    assert!(from_empty.contains("- Overall Risk: no vulnerabilities"));
    assert!(!from_empty.contains("## Project:"));
}

#[test]
fn unparseable_input_yields_fixed_fallback_not_a_failure() {
    let text = pipeline("<<< definitely not json >>>");
    assert!(text.contains("could not be parsed"));
    assert!(text.contains("- Total Projects Scanned: 0"));
    assert!(!text.contains("## Project:"));
}

#[test]
fn zero_finding_project_is_ok_with_no_severity_subsection() {
    let input = r#"[{"projectName": "clean", "vulnerabilities": []}]"#;
    let summary = summarizer().summarize_document(input);
    assert!(summary.projects[0].report.ok);

    let text = pipeline(input);
    assert!(text.contains("## Project: clean"));
    assert!(text.contains("No vulnerabilities found"));
    assert!(!text.contains("Severity Counts"));
    assert!(!text.contains("## Severity Breakdown"));
}

// =============================================================================
// NDJSON 복구
// =============================================================================

#[test]
fn ndjson_one_malformed_line_among_n_valid_lines() {
    let input = "\
{\"projectName\": \"p1\", \"vulnerabilities\": [{\"severity\": \"high\"}]}\n\
{\"projectName\": \"p2\", \"vulnerabilities\": [{\"severity\": \"low\"}]}\n\
this line is broken }{\n\
{\"projectName\": \"p3\", \"vulnerabilities\": [{\"severity\": \"critical\"}]}";

    let summary = summarizer().summarize_document(input);
    assert_eq!(summary.total_projects, 3);
    assert_eq!(summary.total_vulnerabilities, 3);
    assert_eq!(summary.skipped_lines, 1);
    assert_eq!(summary.availability, DataAvailability::Partial);

    let text = pipeline(input);
    assert!(text.contains("Data Availability: partial (1 lines skipped)"));
    assert!(text.contains("## Project: p1"));
    assert!(text.contains("## Project: p3"));
}

// =============================================================================
// 스포트라이트 안정 정렬
// =============================================================================

#[test]
fn equal_cvss_spotlight_order_matches_input_order() {
    let input = r#"[{"vulnerabilities": [
        {"id": "alpha", "severity": "high", "cvssScore": 7.5},
        {"id": "beta", "severity": "critical", "cvssScore": 7.5},
        {"id": "gamma", "severity": "high", "cvssScore": 7.5}
    ]}]"#;
    let summary = summarizer().summarize_document(input);
    let ids: Vec<&str> = summary.projects[0]
        .spotlight
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, vec!["alpha", "beta", "gamma"]);
}

#[test]
fn spotlight_limit_from_config_caps_display_only() {
    let config = ReportConfigBuilder::new().spotlight_limit(2).build().unwrap();
    let s = ScanSummarizer::new(config).unwrap();
    let summary = s.summarize_document(
        r#"[{"vulnerabilities": [
            {"severity": "high", "cvssScore": 9.0},
            {"severity": "high", "cvssScore": 8.0},
            {"severity": "high", "cvssScore": 7.0}
        ]}]"#,
    );
    assert_eq!(summary.projects[0].spotlight.len(), 2);
    assert_eq!(summary.severity_counts.high, 3);
}

// =============================================================================
// 멱등성
// =============================================================================

#[test]
fn pipeline_is_byte_idempotent() {
    let input = r#"[
        {"projectName": "a", "vulnerabilities": [
            {"id": "v1", "severity": "critical", "cvssScore": 9.8,
             "packageName": "pkg", "fixedIn": ["2.0.0"],
             "upgradePath": ["app@1.0", "pkg@2.0"]}
        ]},
        {"projectName": "b", "vulnerabilities": []}
    ]"#;

    let first = {
        let outcome = load_str(input);
        let projects = outcome.documents.iter().map(normalize).collect();
        render(&aggregate(
            projects,
            outcome.availability,
            outcome.skipped_lines,
            5,
        ))
    };
    let second = {
        let outcome = load_str(input);
        let projects = outcome.documents.iter().map(normalize).collect();
        render(&aggregate(
            projects,
            outcome.availability,
            outcome.skipped_lines,
            5,
        ))
    };
    assert_eq!(first, second);
}

// =============================================================================
// 구체 시나리오
// =============================================================================

#[test]
fn two_project_array_scenario() {
    let input = r#"[
        {
            "projectName": "project-a",
            "vulnerabilities": [{
                "severity": "HIGH",
                "cvssScore": 7.5,
                "packageName": "commons-text",
                "fixedIn": ["2.1.0"]
            }]
        },
        {
            "projectName": "project-b",
            "vulnerabilities": []
        }
    ]"#;

    let summary = summarizer().summarize_document(input);
    assert_eq!(summary.severity_counts.high, 1);
    assert_eq!(summary.severity_counts.total(), 1);
    assert_eq!(summary.verdict, RiskVerdict::High);

    let text = pipeline(input);
    assert!(text.contains("High: 1"));
    assert!(text.contains("Fixed in: 2.1.0"));
    assert!(text.contains("Overall Risk: high risk"));

    let a_section = text.find("## Project: project-a").unwrap();
    let b_section = text.find("## Project: project-b").unwrap();
    assert!(a_section < b_section);
    assert!(text[b_section..].contains("No vulnerabilities found"));
}

#[test]
fn empty_file_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.json");
    std::fs::write(&input, "").unwrap();
    let output = dir.path().join("summary.txt");

    let config = ReportConfigBuilder::new()
        .input_path(input.to_string_lossy().to_string())
        .output_path(output.to_string_lossy().to_string())
        .build()
        .unwrap();
    ScanSummarizer::new(config).unwrap().run().unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("Total Projects Scanned: 0"));
    assert!(text.contains("no vulnerabilities"));
    assert!(!text.contains("## Project:"));
}
