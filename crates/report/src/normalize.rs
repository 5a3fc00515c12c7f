//! 정규화기 — 원시 프로젝트 문서를 canonical 형태로 변환
//!
//! 모든 필드 접근은 명시적 기본값을 가진 accessor를 통합니다.
//! 필드 누락은 에러가 아니며, 정규화는 어떤 입력에도 실패하지 않습니다.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vulnbrief_core::types::{Severity, SeverityCounts};

/// canonical 취약점 레코드
///
/// 스캐너 스키마의 한 finding 항목을 기본값이 채워진 형태로 나타냅니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityRecord {
    /// 스캐너 발급 식별자
    pub id: String,
    /// 사람이 읽는 설명
    pub title: String,
    /// 심각도 버킷 — 인식 불가/누락 값은 `Unknown`으로 접힘
    pub severity: Severity,
    /// CVSS 점수 (누락 시 0.0)
    pub cvss_score: f64,
    /// 영향받는 패키지 이름
    pub package_name: String,
    /// 현재 설치된 버전
    pub current_version: String,
    /// 수정된 버전 집합 (중복 제거, 렌더링 시 사전순)
    pub fixed_in: BTreeSet<String>,
    /// 업그레이드 경로 홉 (빈/falsy 항목 제거 후 순서 유지)
    pub upgrade_path: Vec<String>,
    /// CVE 식별자 집합
    pub cve_ids: BTreeSet<String>,
    /// 업그레이드로 해결 가능 여부
    pub is_upgradable: bool,
    /// 패치로 해결 가능 여부
    pub is_patchable: bool,
}

/// 수정 현황 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationStats {
    /// 업그레이드가 제안된 고유 패키지 수
    pub upgradable_count: usize,
    /// 스캐너가 미해결로 표시한 finding 수
    pub unresolved_count: usize,
}

/// 정규화된 프로젝트 보고서
///
/// 불변식: `severity_counts`의 버킷 합계 == `vulnerabilities.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    /// 프로젝트 이름
    pub project_name: String,
    /// 패키지 매니저 종류
    pub package_manager: String,
    /// 스캔 대상 매니페스트 파일
    pub target_file: String,
    /// 의존성 수
    pub dependency_count: u64,
    /// canonical 취약점 목록
    pub vulnerabilities: Vec<VulnerabilityRecord>,
    /// 심각도별 분포 (vulnerabilities에서 파생)
    pub severity_counts: SeverityCounts,
    /// 수정 현황 통계
    pub remediation: RemediationStats,
    /// finding이 하나도 없으면 true (파생값)
    pub ok: bool,
}

/// 원시 프로젝트 문서 하나를 [`ProjectReport`]로 정규화합니다.
///
/// 어떤 입력에도 실패하지 않으며, 누락된 필드는 문서화된 기본값으로
/// 채워집니다.
pub fn normalize(doc: &Value) -> ProjectReport {
    let vulnerabilities: Vec<VulnerabilityRecord> = doc
        .get("vulnerabilities")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(normalize_finding).collect())
        .unwrap_or_default();

    let mut severity_counts = SeverityCounts::default();
    for record in &vulnerabilities {
        severity_counts.record(record.severity);
    }

    let ok = vulnerabilities.is_empty();

    ProjectReport {
        project_name: str_or(doc, "projectName", "Unknown Project"),
        package_manager: str_or(doc, "packageManager", "Unknown"),
        target_file: str_or(doc, "targetFile", "Unknown"),
        dependency_count: doc
            .get("dependencyCount")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        vulnerabilities,
        severity_counts,
        remediation: normalize_remediation(doc),
        ok,
    }
}

/// 원시 finding 항목 하나를 canonical 레코드로 변환합니다.
fn normalize_finding(entry: &Value) -> VulnerabilityRecord {
    let severity = entry
        .get("severity")
        .and_then(Value::as_str)
        .and_then(Severity::from_str_loose)
        .unwrap_or(Severity::Unknown);

    // upgradePath는 문자열 외 항목(false 등)과 빈 문자열을 제거
    let upgrade_path: Vec<String> = entry
        .get("upgradePath")
        .and_then(Value::as_array)
        .map(|hops| {
            hops.iter()
                .filter_map(Value::as_str)
                .filter(|hop| !hop.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    let cve_ids = entry
        .get("identifiers")
        .and_then(|ids| ids.get("CVE"))
        .map(string_set)
        .unwrap_or_default();

    VulnerabilityRecord {
        id: str_or(entry, "id", "unknown"),
        title: str_or(entry, "title", "Unknown vulnerability"),
        severity,
        cvss_score: entry
            .get("cvssScore")
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
        package_name: str_or(entry, "packageName", "Unknown package"),
        current_version: str_or(entry, "version", "unknown"),
        fixed_in: entry.get("fixedIn").map(string_set).unwrap_or_default(),
        upgrade_path,
        cve_ids,
        is_upgradable: entry
            .get("isUpgradable")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        is_patchable: entry
            .get("isPatchable")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

/// remediation 블록에서 수정 현황 통계를 추출합니다 (없으면 0).
fn normalize_remediation(doc: &Value) -> RemediationStats {
    let remediation = match doc.get("remediation") {
        Some(block) => block,
        None => return RemediationStats::default(),
    };

    RemediationStats {
        upgradable_count: remediation
            .get("upgrade")
            .and_then(Value::as_object)
            .map(|upgrades| upgrades.len())
            .unwrap_or(0),
        unresolved_count: remediation
            .get("unresolved")
            .and_then(Value::as_array)
            .map(|entries| entries.len())
            .unwrap_or(0),
    }
}

// --- 명시적 기본값 accessor ---

fn str_or(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_owned()
}

fn string_set(value: &Value) -> BTreeSet<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
