//! 보고서 렌더러
//!
//! 집계된 [`SummaryDocument`]를 결정적 텍스트 보고서로 렌더링합니다.
//! 순수 함수이며, 타임스탬프를 포함하지 않고, 동일 입력은 항상 바이트
//! 단위로 동일한 출력을 생성합니다.
//!
//! 섹션 순서는 계약으로 고정됩니다: 요약 → 전체 심각도 분포 →
//! 프로젝트별 섹션 → 권장 업그레이드 → 조치 항목 → 푸터.

use vulnbrief_core::types::{Severity, SeverityCounts};

use crate::aggregate::{ProjectSummary, SummaryDocument};
use crate::loader::DataAvailability;

const HEADER: &str = "# Vulnerability Scan Summary";
const FOOTER: &str = "vulnbrief scan report";

/// 심각도 분포 렌더링 순서 (내림차순, Unknown 마지막)
const SEVERITY_ORDER: [Severity; 5] = [
    Severity::Critical,
    Severity::High,
    Severity::Medium,
    Severity::Low,
    Severity::Unknown,
];

/// 요약 문서를 보고서 텍스트로 렌더링합니다.
///
/// 입력이 없거나(`Empty`) 파싱 불가(`Unavailable`)인 경우 고정된
/// 대체 문서로 단락됩니다.
pub fn render(summary: &SummaryDocument) -> String {
    match summary.availability {
        DataAvailability::Empty => return render_no_data(summary),
        DataAvailability::Unavailable => return render_unparseable(summary),
        DataAvailability::Full | DataAvailability::Partial => {}
    }

    let mut lines: Vec<String> = Vec::new();
    lines.push(HEADER.to_owned());
    lines.push(String::new());

    render_overall(summary, &mut lines);

    if summary.total_vulnerabilities > 0 {
        lines.push("## Severity Breakdown".to_owned());
        render_severity_lines(&summary.severity_counts, "- ", &mut lines);
        lines.push(String::new());
    }

    for project in &summary.projects {
        render_project(project, &mut lines);
    }

    render_recommended_upgrades(summary, &mut lines);
    render_action_items(summary, &mut lines);
    render_footer(&mut lines);

    lines.join("\n")
}

/// 입력 없음 대체 문서
fn render_no_data(summary: &SummaryDocument) -> String {
    let lines = vec![
        HEADER.to_owned(),
        String::new(),
        "No scan data was available to summarize.".to_owned(),
        String::new(),
        "- Total Projects Scanned: 0".to_owned(),
        "- Total Vulnerabilities: 0".to_owned(),
        format!("- Overall Risk: {}", summary.verdict),
        "- Data Availability: none".to_owned(),
        String::new(),
        "---".to_owned(),
        FOOTER.to_owned(),
        String::new(),
    ];
    lines.join("\n")
}

/// 파싱 불가 대체 문서
fn render_unparseable(summary: &SummaryDocument) -> String {
    let lines = vec![
        HEADER.to_owned(),
        String::new(),
        "The scan input could not be parsed; no report data is available.".to_owned(),
        String::new(),
        "- Total Projects Scanned: 0".to_owned(),
        "- Total Vulnerabilities: 0".to_owned(),
        format!("- Overall Risk: {}", summary.verdict),
        "- Data Availability: none (input could not be parsed)".to_owned(),
        String::new(),
        "---".to_owned(),
        FOOTER.to_owned(),
        String::new(),
    ];
    lines.join("\n")
}

fn render_overall(summary: &SummaryDocument, lines: &mut Vec<String>) {
    lines.push("## Overall Summary".to_owned());
    lines.push(format!(
        "- Total Projects Scanned: {}",
        summary.total_projects
    ));
    lines.push(format!(
        "- Projects with Vulnerabilities: {}",
        summary.projects_with_vulnerabilities
    ));
    lines.push(format!(
        "- Total Vulnerabilities: {}",
        summary.total_vulnerabilities
    ));
    lines.push(format!("- Overall Risk: {}", summary.verdict));
    lines.push(format!(
        "- Data Availability: {}",
        availability_label(summary)
    ));
    lines.push(String::new());
}

fn availability_label(summary: &SummaryDocument) -> String {
    match summary.availability {
        DataAvailability::Full => "full".to_owned(),
        DataAvailability::Partial => {
            format!("partial ({} lines skipped)", summary.skipped_lines)
        }
        DataAvailability::Empty => "none".to_owned(),
        DataAvailability::Unavailable => "none (input could not be parsed)".to_owned(),
    }
}

/// 0이 아닌 버킷만 렌더링합니다 (Unknown 포함).
fn render_severity_lines(counts: &SeverityCounts, prefix: &str, lines: &mut Vec<String>) {
    for severity in SEVERITY_ORDER {
        let count = counts.get(severity);
        if count > 0 {
            lines.push(format!("{prefix}{severity}: {count}"));
        }
    }
}

fn render_project(project: &ProjectSummary, lines: &mut Vec<String>) {
    let report = &project.report;
    lines.push(format!("## Project: {}", report.project_name));
    lines.push(format!("- Target File: {}", report.target_file));
    lines.push(format!("- Package Manager: {}", report.package_manager));
    lines.push(format!("- Dependencies: {}", report.dependency_count));

    if report.ok {
        lines.push("- No vulnerabilities found.".to_owned());
        lines.push(String::new());
        return;
    }

    lines.push(format!(
        "- Total Vulnerabilities: {}",
        report.vulnerabilities.len()
    ));
    lines.push("- Severity Counts:".to_owned());
    render_severity_lines(&report.severity_counts, "  - ", lines);

    lines.push("- Remediation Status:".to_owned());
    lines.push(format!(
        "  - Upgradable packages: {}",
        report.remediation.upgradable_count
    ));
    lines.push(format!(
        "  - Unresolved findings: {}",
        report.remediation.unresolved_count
    ));

    if !project.fix_index.is_empty() {
        lines.push("- Packages with Fixes:".to_owned());
        for (package, versions) in &project.fix_index {
            let joined: Vec<&str> = versions.iter().map(String::as_str).collect();
            lines.push(format!("  - {package} (Fixed in: {})", joined.join(", ")));
        }
    }

    if !project.spotlight.is_empty() {
        lines.push("- Top Severity Findings:".to_owned());
        for record in &project.spotlight {
            lines.push(format!(
                "  - [{}] {}: {} ({}@{}, CVSS {:.1})",
                record.severity,
                record.id,
                record.title,
                record.package_name,
                record.current_version,
                record.cvss_score
            ));
        }
    }

    lines.push(String::new());
}

fn render_recommended_upgrades(summary: &SummaryDocument, lines: &mut Vec<String>) {
    if summary.upgrade_index.is_empty() {
        return;
    }

    lines.push("## Recommended Upgrades".to_owned());
    for (package, paths) in &summary.upgrade_index {
        lines.push(format!("- {package}:"));
        for path in paths {
            lines.push(format!("  - {path}"));
        }
        if let Some(latest) = summary.latest_versions.get(package) {
            lines.push(format!("  - Latest known version: {latest}"));
        }
    }
    lines.push(String::new());
}

fn render_action_items(summary: &SummaryDocument, lines: &mut Vec<String>) {
    lines.push("## Action Items".to_owned());

    if summary.total_vulnerabilities == 0 {
        lines.push("- No action required.".to_owned());
        lines.push(String::new());
        return;
    }

    let mut any = false;
    let counts = &summary.severity_counts;
    if counts.critical > 0 {
        lines.push(format!(
            "- Address {} critical finding(s) immediately.",
            counts.critical
        ));
        any = true;
    }
    if counts.high > 0 {
        lines.push(format!(
            "- Review {} high severity finding(s).",
            counts.high
        ));
        any = true;
    }

    let upgradable: usize = summary
        .projects
        .iter()
        .map(|p| p.report.remediation.upgradable_count)
        .sum();
    if upgradable > 0 {
        lines.push(format!(
            "- {upgradable} package(s) can be remediated by upgrading."
        ));
        any = true;
    }

    let unresolved: usize = summary
        .projects
        .iter()
        .map(|p| p.report.remediation.unresolved_count)
        .sum();
    if unresolved > 0 {
        lines.push(format!("- {unresolved} finding(s) require manual review."));
        any = true;
    }

    if counts.unknown > 0 {
        lines.push(format!(
            "- Classify {} finding(s) of unknown severity.",
            counts.unknown
        ));
        any = true;
    }

    if !any {
        lines.push("- No immediate action required.".to_owned());
    }
    lines.push(String::new());
}

fn render_footer(lines: &mut Vec<String>) {
    lines.push("---".to_owned());
    lines.push(FOOTER.to_owned());
    lines.push(String::new());
}
