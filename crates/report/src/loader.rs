//! 스캔 결과 로더
//!
//! 원시 입력을 프로젝트 단위 JSON 문서 목록으로 변환합니다.
//! 세 가지 입력 형태를 우선순위대로 자동 감지합니다:
//!
//! 1. 단일 JSON 객체 (프로젝트 하나)
//! 2. JSON 배열 (프로젝트 여러 개)
//! 3. NDJSON (한 줄에 하나씩, 줄 단위 독립 파싱)
//!
//! 로더는 호출자에게 절대 에러를 반환하지 않습니다. 누락/비어있는/읽을 수
//! 없는 입력은 빈 결과로, 잘못된 NDJSON 줄은 건너뛰기로 처리됩니다.

use std::path::Path;

use serde_json::Value;
use tracing::{error, warn};

/// 입력 데이터 가용성
///
/// 보고서 요약부에 항상 표기되는 로딩 결과의 품질 등급입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataAvailability {
    /// 모든 입력이 파싱됨
    Full,
    /// 일부 줄이 건너뛰어짐 (NDJSON 복구 경로)
    Partial,
    /// 입력이 없거나 비어있음
    Empty,
    /// 입력이 존재하나 아무것도 파싱되지 않음
    Unavailable,
}

/// 로딩 결과
///
/// 파싱된 프로젝트 문서 목록과 가용성 판정, 건너뛴 줄 수를 담습니다.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// 프로젝트 단위 원시 문서
    pub documents: Vec<Value>,
    /// 데이터 가용성 판정
    pub availability: DataAvailability,
    /// NDJSON 복구 중 건너뛴 줄 수
    pub skipped_lines: usize,
}

impl LoadOutcome {
    fn empty() -> Self {
        Self {
            documents: Vec::new(),
            availability: DataAvailability::Empty,
            skipped_lines: 0,
        }
    }
}

/// 문자열 입력에서 프로젝트 문서를 로딩합니다.
///
/// 전체 문서 파싱을 먼저 시도하고, 실패하면 NDJSON 줄 단위 파싱으로
/// 전환합니다. 잘못된 줄 하나가 전체 실행을 중단시키지 않습니다.
pub fn load_str(input: &str) -> LoadOutcome {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return LoadOutcome::empty();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => LoadOutcome {
            documents: items,
            availability: DataAvailability::Full,
            skipped_lines: 0,
        },
        Ok(single) => LoadOutcome {
            documents: vec![single],
            availability: DataAvailability::Full,
            skipped_lines: 0,
        },
        Err(_) => load_ndjson(trimmed),
    }
}

/// 파일에서 프로젝트 문서를 로딩합니다.
///
/// 파일이 없거나, 읽을 수 없거나, `max_input_size`를 초과하면 에러를
/// 기록하고 빈 결과를 반환합니다.
pub fn load_path(path: &Path, max_input_size: usize) -> LoadOutcome {
    match std::fs::metadata(path) {
        Ok(meta) => {
            let size = meta.len() as usize;
            if size > max_input_size {
                error!(
                    path = %path.display(),
                    size,
                    max = max_input_size,
                    "scan result file exceeds maximum input size"
                );
                return LoadOutcome::empty();
            }
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "scan result file not found");
            return LoadOutcome::empty();
        }
    }

    match std::fs::read_to_string(path) {
        Ok(content) => load_str(&content),
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to read scan result file");
            LoadOutcome::empty()
        }
    }
}

/// NDJSON 복구 경로: 비어있지 않은 각 줄을 독립적으로 파싱합니다.
fn load_ndjson(input: &str) -> LoadOutcome {
    let mut documents = Vec::new();
    let mut skipped_lines = 0usize;

    for (idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                skipped_lines += 1;
                warn!(line = idx + 1, error = %e, "skipping malformed scan result line");
            }
        }
    }

    let availability = if documents.is_empty() {
        DataAvailability::Unavailable
    } else if skipped_lines > 0 {
        DataAvailability::Partial
    } else {
        DataAvailability::Full
    };

    LoadOutcome {
        documents,
        availability,
        skipped_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_outcome() {
        let outcome = load_str("");
        assert!(outcome.documents.is_empty());
        assert_eq!(outcome.availability, DataAvailability::Empty);
        assert_eq!(outcome.skipped_lines, 0);
    }

    #[test]
    fn whitespace_input_yields_empty_outcome() {
        let outcome = load_str("   \n\t  \n");
        assert!(outcome.documents.is_empty());
        assert_eq!(outcome.availability, DataAvailability::Empty);
    }

    #[test]
    fn single_object_is_sole_document() {
        let outcome = load_str(r#"{"projectName": "app"}"#);
        assert_eq!(outcome.documents.len(), 1);
        assert_eq!(outcome.availability, DataAvailability::Full);
        assert_eq!(outcome.documents[0]["projectName"], "app");
    }

    #[test]
    fn array_elements_become_documents() {
        let outcome = load_str(r#"[{"projectName": "a"}, {"projectName": "b"}]"#);
        assert_eq!(outcome.documents.len(), 2);
        assert_eq!(outcome.availability, DataAvailability::Full);
    }

    #[test]
    fn empty_array_yields_zero_documents_full() {
        let outcome = load_str("[]");
        assert!(outcome.documents.is_empty());
        assert_eq!(outcome.availability, DataAvailability::Full);
    }

    #[test]
    fn ndjson_lines_parse_independently() {
        let input = "{\"projectName\": \"a\"}\n{\"projectName\": \"b\"}\n{\"projectName\": \"c\"}";
        let outcome = load_str(input);
        assert_eq!(outcome.documents.len(), 3);
        assert_eq!(outcome.availability, DataAvailability::Full);
        assert_eq!(outcome.skipped_lines, 0);
    }

    #[test]
    fn ndjson_malformed_line_is_skipped_and_counted() {
        let input = "{\"projectName\": \"a\"}\nnot json at all {{{\n{\"projectName\": \"b\"}";
        let outcome = load_str(input);
        assert_eq!(outcome.documents.len(), 2);
        assert_eq!(outcome.skipped_lines, 1);
        assert_eq!(outcome.availability, DataAvailability::Partial);
    }

    #[test]
    fn ndjson_blank_lines_are_ignored() {
        let input = "{\"projectName\": \"a\"}\n\n\n{\"projectName\": \"b\"}";
        let outcome = load_str(input);
        assert_eq!(outcome.documents.len(), 2);
        assert_eq!(outcome.skipped_lines, 0);
        assert_eq!(outcome.availability, DataAvailability::Full);
    }

    #[test]
    fn garbage_input_is_unavailable() {
        let outcome = load_str("this is not json\nand neither is this");
        assert!(outcome.documents.is_empty());
        assert_eq!(outcome.availability, DataAvailability::Unavailable);
        assert_eq!(outcome.skipped_lines, 2);
    }

    #[test]
    fn missing_file_yields_empty_outcome() {
        let outcome = load_path(
            Path::new("/tmp/vulnbrief_test_missing_98765.json"),
            10 * 1024 * 1024,
        );
        assert!(outcome.documents.is_empty());
        assert_eq!(outcome.availability, DataAvailability::Empty);
    }

    #[test]
    fn oversized_file_yields_empty_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.json");
        std::fs::write(&path, r#"{"projectName": "app"}"#).unwrap();

        let outcome = load_path(&path, 4);
        assert!(outcome.documents.is_empty());
        assert_eq!(outcome.availability, DataAvailability::Empty);
    }

    #[test]
    fn file_within_limit_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        std::fs::write(&path, r#"[{"projectName": "app"}]"#).unwrap();

        let outcome = load_path(&path, 10 * 1024 * 1024);
        assert_eq!(outcome.documents.len(), 1);
        assert_eq!(outcome.availability, DataAvailability::Full);
    }
}
