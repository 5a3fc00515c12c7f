//! 보고서 엔진 설정
//!
//! [`ReportConfig`]는 core의 [`ReportSection`](vulnbrief_core::config::ReportSection)에서
//! 파생되며, 파이프라인 진입점에 명시적으로 전달됩니다.
//! 입출력 경로를 모듈 전역 상수가 아닌 설정값으로 관리합니다.
//!
//! # 사용 예시
//!
//! ```
//! use vulnbrief_report::ReportConfigBuilder;
//!
//! let config = ReportConfigBuilder::new()
//!     .input_path("ci/scan-results.json")
//!     .spotlight_limit(10)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.spotlight_limit, 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// 보고서 엔진 설정
///
/// # 필드
///
/// - **input_path**: 스캔 결과 입력 경로 (JSON 또는 NDJSON)
/// - **output_path**: 요약 보고서 출력 경로
/// - **spotlight_limit**: 스포트라이트 섹션 최대 항목 수
/// - **max_input_size**: 입력 파일 최대 허용 크기 (바이트)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// 스캔 결과 입력 경로
    pub input_path: String,
    /// 요약 보고서 출력 경로
    pub output_path: String,
    /// 스포트라이트 섹션 최대 항목 수
    pub spotlight_limit: usize,
    /// 입력 파일 최대 허용 크기 (바이트)
    pub max_input_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: "scan-results.json".to_owned(),
            output_path: "reports/scan-summary.txt".to_owned(),
            spotlight_limit: 5,
            max_input_size: 10 * 1024 * 1024, // 10 MB
        }
    }
}

/// 설정 상한값 상수
const MAX_SPOTLIGHT_LIMIT: usize = 100;
const MAX_INPUT_SIZE: usize = 100 * 1024 * 1024; // 100 MB
const MAX_PATH_LEN: usize = 4096;

impl ReportConfig {
    /// core의 `ReportSection`에서 보고서 설정을 생성합니다.
    pub fn from_core(core: &vulnbrief_core::config::ReportSection) -> Self {
        Self {
            input_path: core.input_path.clone(),
            output_path: core.output_path.clone(),
            spotlight_limit: core.spotlight_limit,
            max_input_size: core.max_input_size,
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `input_path` / `output_path`: 비어있으면 안 되고, `..` 경로 순회
    ///   패턴을 포함하면 안 되며, 길이 제한을 넘으면 안 됨
    /// - `spotlight_limit`: 1-100
    /// - `max_input_size`: 1-104857600 (100MB)
    pub fn validate(&self) -> Result<(), ReportError> {
        validate_path("input_path", &self.input_path)?;
        validate_path("output_path", &self.output_path)?;

        if self.spotlight_limit == 0 || self.spotlight_limit > MAX_SPOTLIGHT_LIMIT {
            return Err(ReportError::Config {
                field: "spotlight_limit".to_owned(),
                reason: format!("must be 1-{MAX_SPOTLIGHT_LIMIT}"),
            });
        }

        if self.max_input_size == 0 || self.max_input_size > MAX_INPUT_SIZE {
            return Err(ReportError::Config {
                field: "max_input_size".to_owned(),
                reason: format!("must be 1-{MAX_INPUT_SIZE}"),
            });
        }

        Ok(())
    }
}

fn validate_path(field: &str, path: &str) -> Result<(), ReportError> {
    if path.is_empty() {
        return Err(ReportError::Config {
            field: field.to_owned(),
            reason: "must not be empty".to_owned(),
        });
    }

    // Path traversal 체크: Path::components()로 정확하게 ParentDir 컴포넌트 검출
    if std::path::Path::new(path)
        .components()
        .any(|c| c == std::path::Component::ParentDir)
    {
        return Err(ReportError::Config {
            field: field.to_owned(),
            reason: format!("path '{path}' contains path traversal pattern '..'"),
        });
    }

    if path.len() > MAX_PATH_LEN {
        return Err(ReportError::Config {
            field: field.to_owned(),
            reason: format!("path exceeds maximum length {MAX_PATH_LEN}"),
        });
    }

    Ok(())
}

/// [`ReportConfig`] 빌더
///
/// 유연한 설정 구성 및 빌드 시 유효성 검증을 제공합니다.
#[derive(Default)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 입력 경로를 설정합니다.
    pub fn input_path(mut self, path: impl Into<String>) -> Self {
        self.config.input_path = path.into();
        self
    }

    /// 출력 경로를 설정합니다.
    pub fn output_path(mut self, path: impl Into<String>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// 스포트라이트 최대 항목 수를 설정합니다.
    pub fn spotlight_limit(mut self, limit: usize) -> Self {
        self.config.spotlight_limit = limit;
        self
    }

    /// 입력 파일 최대 크기(바이트)를 설정합니다.
    pub fn max_input_size(mut self, size: usize) -> Self {
        self.config.max_input_size = size;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `ReportError::Config` 반환
    pub fn build(self) -> Result<ReportConfig, ReportError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
