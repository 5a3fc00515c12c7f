//! 집계기 — 정규화된 프로젝트에서 요약 통계 산출
//!
//! 프로젝트별/전체 심각도 분포, 패키지 수정 버전 색인, 권장 업그레이드
//! 색인, 스포트라이트 선정, 위험도 판정을 계산합니다.
//! 색인은 모두 BTree 기반이므로 렌더링 순서가 사전순으로 결정적입니다.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use vulnbrief_core::types::{Severity, SeverityCounts};

use crate::loader::DataAvailability;
use crate::normalize::{ProjectReport, VulnerabilityRecord};

/// 업그레이드 경로 홉 구분자
pub const UPGRADE_ARROW: &str = " → ";

/// 전체 위험도 판정
///
/// 심각도 분포에서 순수하게 파생됩니다. 엄격한 우선순위로 평가되며,
/// `Unknown` finding만 있는 경우는 "no vulnerabilities"로 판정됩니다
/// (개수에는 그대로 포함).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskVerdict {
    /// critical finding 존재
    Critical,
    /// high finding 존재 (critical 없음)
    High,
    /// medium finding 존재 (critical/high 없음)
    Medium,
    /// low finding만 존재
    Low,
    /// 위험으로 분류된 finding 없음
    NoVulnerabilities,
}

impl RiskVerdict {
    /// 심각도 분포에서 판정을 파생합니다.
    pub fn from_counts(counts: &SeverityCounts) -> Self {
        if counts.critical > 0 {
            Self::Critical
        } else if counts.high > 0 {
            Self::High
        } else if counts.medium > 0 {
            Self::Medium
        } else if counts.low > 0 {
            Self::Low
        } else {
            Self::NoVulnerabilities
        }
    }
}

impl fmt::Display for RiskVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "critical risk"),
            Self::High => write!(f, "high risk"),
            Self::Medium => write!(f, "medium risk"),
            Self::Low => write!(f, "low risk"),
            Self::NoVulnerabilities => write!(f, "no vulnerabilities"),
        }
    }
}

/// 프로젝트 하나의 집계 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// 정규화된 프로젝트 보고서
    pub report: ProjectReport,
    /// 패키지별 수정 버전 색인 (패키지 → fixedIn 버전 합집합)
    pub fix_index: BTreeMap<String, BTreeSet<String>>,
    /// 스포트라이트: critical/high finding을 CVSS 내림차순으로 정렬해
    /// 상한까지만 유지한 목록 (표시용 상한이며, 개수 집계에는 영향 없음)
    pub spotlight: Vec<VulnerabilityRecord>,
}

/// 전체 요약 문서
///
/// 렌더링 입력이 되는 최종 집계 모델입니다. 실행마다 입력에서 한 번
/// 구성되며 이후 불변입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDocument {
    /// 프로젝트별 집계
    pub projects: Vec<ProjectSummary>,
    /// 스캔된 프로젝트 수
    pub total_projects: usize,
    /// finding이 하나 이상 있는 프로젝트 수
    pub projects_with_vulnerabilities: usize,
    /// 전체 finding 수
    pub total_vulnerabilities: usize,
    /// 전체 심각도 분포
    pub severity_counts: SeverityCounts,
    /// 전체 위험도 판정
    pub verdict: RiskVerdict,
    /// 입력 데이터 가용성
    pub availability: DataAvailability,
    /// 로딩 중 건너뛴 줄 수
    pub skipped_lines: usize,
    /// 전역 권장 업그레이드 색인 (패키지 → 업그레이드 경로 렌더링 집합)
    pub upgrade_index: BTreeMap<String, BTreeSet<String>>,
    /// 패키지별 최신 알려진 버전 (VersionLookup 협력자 장식, 기본 비어있음)
    pub latest_versions: BTreeMap<String, String>,
}

/// 정규화된 프로젝트들을 요약 문서로 집계합니다.
pub fn aggregate(
    projects: Vec<ProjectReport>,
    availability: DataAvailability,
    skipped_lines: usize,
    spotlight_limit: usize,
) -> SummaryDocument {
    let mut severity_counts = SeverityCounts::default();
    let mut upgrade_index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut total_vulnerabilities = 0;
    let mut projects_with_vulnerabilities = 0;

    let mut summaries = Vec::with_capacity(projects.len());
    for report in projects {
        severity_counts.merge(&report.severity_counts);
        total_vulnerabilities += report.vulnerabilities.len();
        if !report.ok {
            projects_with_vulnerabilities += 1;
        }

        for record in &report.vulnerabilities {
            if record.upgrade_path.is_empty() {
                continue;
            }
            upgrade_index
                .entry(record.package_name.clone())
                .or_default()
                .insert(record.upgrade_path.join(UPGRADE_ARROW));
        }

        let fix_index = build_fix_index(&report);
        let spotlight = select_spotlight(&report.vulnerabilities, spotlight_limit);
        summaries.push(ProjectSummary {
            report,
            fix_index,
            spotlight,
        });
    }

    let verdict = RiskVerdict::from_counts(&severity_counts);

    SummaryDocument {
        total_projects: summaries.len(),
        projects: summaries,
        projects_with_vulnerabilities,
        total_vulnerabilities,
        severity_counts,
        verdict,
        availability,
        skipped_lines,
        upgrade_index,
        latest_versions: BTreeMap::new(),
    }
}

/// 패키지별 수정 버전 색인: 같은 패키지의 finding들이 보고한 fixedIn
/// 버전의 합집합입니다.
fn build_fix_index(report: &ProjectReport) -> BTreeMap<String, BTreeSet<String>> {
    let mut index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for record in &report.vulnerabilities {
        if record.fixed_in.is_empty() {
            continue;
        }
        index
            .entry(record.package_name.clone())
            .or_default()
            .extend(record.fixed_in.iter().cloned());
    }
    index
}

/// 스포트라이트 선정: critical/high finding을 CVSS 내림차순 안정 정렬 후
/// 상한까지 유지합니다. 동점은 입력 순서를 보존합니다.
fn select_spotlight(
    records: &[VulnerabilityRecord],
    spotlight_limit: usize,
) -> Vec<VulnerabilityRecord> {
    let mut spotlight: Vec<VulnerabilityRecord> = records
        .iter()
        .filter(|r| matches!(r.severity, Severity::Critical | Severity::High))
        .cloned()
        .collect();
    // sort_by는 안정 정렬이므로 동점 시 입력 순서가 유지됨
    spotlight.sort_by(|a, b| b.cvss_score.total_cmp(&a.cvss_score));
    spotlight.truncate(spotlight_limit);
    spotlight
}
