//! 에러 타입 — 도메인별 에러 정의

/// Vulnbrief 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum VulnbriefError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 요약 파이프라인 에러
    #[error("summary error: {0}")]
    Summary(#[from] SummaryError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 요약 파이프라인 에러
///
/// 보고서 모듈의 세부 에러는 이 코어 수준 분류로 변환되어 전파됩니다.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// 스캔 결과 로딩 실패
    #[error("load failed: {0}")]
    LoadFailed(String),

    /// 보고서 렌더링 실패
    #[error("render failed: {0}")]
    RenderFailed(String),

    /// 보고서 기록 실패
    #[error("write failed: {0}")]
    WriteFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound {
            path: "vulnbrief.toml".to_owned(),
        };
        assert!(err.to_string().contains("vulnbrief.toml"));
    }

    #[test]
    fn config_error_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            field: "general.log_level".to_owned(),
            reason: "must be one of: trace, debug, info, warn, error".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("general.log_level"));
        assert!(msg.contains("must be one of"));
    }

    #[test]
    fn summary_error_display() {
        let err = SummaryError::LoadFailed("scan-results.json: truncated".to_owned());
        let msg = err.to_string();
        assert!(msg.contains("load failed"));
        assert!(msg.contains("truncated"));
    }

    #[test]
    fn config_error_converts_to_vulnbrief_error() {
        let err = ConfigError::ParseFailed {
            reason: "bad toml".to_owned(),
        };
        let top: VulnbriefError = err.into();
        assert!(matches!(top, VulnbriefError::Config(_)));
        assert!(top.to_string().contains("config error"));
    }

    #[test]
    fn summary_error_converts_to_vulnbrief_error() {
        let err = SummaryError::WriteFailed("disk full".to_owned());
        let top: VulnbriefError = err.into();
        assert!(matches!(top, VulnbriefError::Summary(_)));
    }

    #[test]
    fn io_error_converts_to_vulnbrief_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let top: VulnbriefError = io_err.into();
        assert!(matches!(top, VulnbriefError::Io(_)));
    }
}
