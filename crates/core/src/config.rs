//! 설정 관리 — vulnbrief.toml 파싱 및 런타임 설정
//!
//! [`VulnbriefConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`VULNBRIEF_REPORT_INPUT_PATH=results.json` 형식)
//! 3. 설정 파일 (`vulnbrief.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```
//! use vulnbrief_core::config::VulnbriefConfig;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = VulnbriefConfig::parse("[general]\nlog_level = \"debug\"").unwrap();
//! assert_eq!(config.general.log_level, "debug");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, VulnbriefError};

/// Vulnbrief 통합 설정
///
/// `vulnbrief.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 모듈은 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VulnbriefConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 보고서 파이프라인 설정
    #[serde(default)]
    pub report: ReportSection,
}

impl VulnbriefConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VulnbriefError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VulnbriefError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VulnbriefError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                VulnbriefError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, VulnbriefError> {
        toml::from_str(toml_str).map_err(|e| {
            VulnbriefError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `VULNBRIEF_{SECTION}_{FIELD}`
    /// 예: `VULNBRIEF_REPORT_INPUT_PATH=results.json`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "VULNBRIEF_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "VULNBRIEF_GENERAL_LOG_FORMAT");

        // Report
        override_string(&mut self.report.input_path, "VULNBRIEF_REPORT_INPUT_PATH");
        override_string(&mut self.report.output_path, "VULNBRIEF_REPORT_OUTPUT_PATH");
        override_usize(
            &mut self.report.spotlight_limit,
            "VULNBRIEF_REPORT_SPOTLIGHT_LIMIT",
        );
        override_usize(
            &mut self.report.max_input_size,
            "VULNBRIEF_REPORT_MAX_INPUT_SIZE",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), VulnbriefError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // 경로 검증 (세부 제한값은 report 크레이트의 ReportConfig가 검증)
        if self.report.input_path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.input_path".to_owned(),
                reason: "input_path must not be empty".to_owned(),
            }
            .into());
        }

        if self.report.output_path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.output_path".to_owned(),
                reason: "output_path must not be empty".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

// Default는 derive 매크로로 자동 생성 (각 필드가 Default를 구현하므로)

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (text, json)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "text".to_owned(),
        }
    }
}

/// 보고서 파이프라인 설정
///
/// 원본 스캔 결과의 입력 위치와 요약 보고서의 출력 위치를 지정합니다.
/// 모듈 전역 상수가 아니라 파이프라인 진입점에 전달되는 명시적 값입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// 스캔 결과 입력 경로 (JSON 또는 NDJSON)
    pub input_path: String,
    /// 요약 보고서 출력 경로
    pub output_path: String,
    /// 스포트라이트 섹션 최대 항목 수
    pub spotlight_limit: usize,
    /// 입력 파일 최대 허용 크기 (바이트)
    pub max_input_size: usize,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            input_path: "scan-results.json".to_owned(),
            output_path: "reports/scan-summary.txt".to_owned(),
            spotlight_limit: 5,
            max_input_size: 10 * 1024 * 1024, // 10 MB
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
