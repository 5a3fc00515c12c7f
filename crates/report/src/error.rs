//! 보고서 엔진 에러 타입
//!
//! [`ReportError`]는 보고서 모듈 내에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<ReportError> for VulnbriefError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.
//!
//! 파이프라인 자체(정규화, 집계, 렌더링)는 계약상 실패하지 않으므로
//! 에러는 파일 경계(입력 읽기, 출력 쓰기)와 설정 검증에서만 발생합니다.

use vulnbrief_core::error::{ConfigError, SummaryError, VulnbriefError};

/// 보고서 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// 입력 파일 읽기 실패
    #[error("input read error: {path}: {source}")]
    InputRead {
        /// 입력 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 입력 파일 크기 초과
    #[error("input too large: {path}: {size} bytes (max: {max})")]
    InputTooBig {
        /// 입력 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: usize,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },

    /// 보고서 출력 쓰기 실패
    #[error("output write error: {path}: {source}")]
    OutputWrite {
        /// 출력 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<ReportError> for VulnbriefError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InputRead { path, source } => VulnbriefError::Summary(
                SummaryError::LoadFailed(format!("input read error: {path}: {source}")),
            ),
            ReportError::InputTooBig { path, size, max } => {
                VulnbriefError::Summary(SummaryError::LoadFailed(format!(
                    "input too large: {path}: {size} bytes (max: {max})"
                )))
            }
            ReportError::OutputWrite { path, source } => VulnbriefError::Summary(
                SummaryError::WriteFailed(format!("output write error: {path}: {source}")),
            ),
            ReportError::Config { field, reason } => {
                VulnbriefError::Config(ConfigError::InvalidValue { field, reason })
            }
        }
    }
}
