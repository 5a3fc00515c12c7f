//! 요약 orchestrator — load → normalize → aggregate → render 구동
//!
//! [`ScanSummarizer`]는 파이프라인 전체를 묶는 진입점입니다.
//! 입력 읽기 실패는 대체 보고서로 강등되므로 `summarize_str`은 절대
//! 실패하지 않으며, `run()`은 최종 쓰기 에러만 전파합니다.

use std::path::{Path, PathBuf};

use tracing::info;

use vulnbrief_core::plugin::{UNKNOWN_VERSION, VersionLookup};

use crate::aggregate::{self, SummaryDocument};
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::loader::{self, LoadOutcome};
use crate::normalize;
use crate::render;

/// 스캔 요약 orchestrator
///
/// 설정과 선택적 [`VersionLookup`] 협력자를 보유하며, 실행마다 입력에서
/// 요약 문서를 새로 구성합니다. 실행 간 공유 상태는 없습니다.
pub struct ScanSummarizer {
    config: ReportConfig,
    version_lookup: Option<Box<dyn VersionLookup>>,
}

impl ScanSummarizer {
    /// 검증된 설정으로 summarizer를 생성합니다.
    pub fn new(config: ReportConfig) -> Result<Self, ReportError> {
        config.validate()?;
        Ok(Self {
            config,
            version_lookup: None,
        })
    }

    /// 빌더를 반환합니다.
    pub fn builder() -> ScanSummarizerBuilder {
        ScanSummarizerBuilder::new()
    }

    /// 현재 설정에 대한 참조를 반환합니다.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// 문자열 입력에서 요약 문서를 구성합니다.
    pub fn summarize_document(&self, input: &str) -> SummaryDocument {
        self.build_summary(loader::load_str(input))
    }

    /// 문자열 입력에서 보고서 텍스트를 생성합니다. 실패하지 않습니다.
    ///
    /// 비어있거나 파싱할 수 없는 입력은 고정된 대체 보고서로 강등됩니다.
    pub fn summarize_str(&self, input: &str) -> String {
        render::render(&self.summarize_document(input))
    }

    /// 설정된 입력 파일에서 요약 문서를 구성합니다.
    ///
    /// 입력 쪽 문제는 대체 문서로 강등되므로 실패하지 않습니다.
    pub fn summarize_path(&self) -> SummaryDocument {
        let input_path = Path::new(&self.config.input_path);
        self.build_summary(loader::load_path(input_path, self.config.max_input_size))
    }

    /// 설정된 입력 파일을 요약해 출력 파일에 기록합니다.
    ///
    /// 입력 쪽 문제(누락, 크기 초과, 파싱 불가)는 대체 보고서로
    /// 강등되므로 다운스트림은 항상 보고서 파일을 읽을 수 있습니다.
    /// 출력 쓰기 실패만 에러로 전파됩니다.
    pub fn run(&self) -> Result<PathBuf, ReportError> {
        let summary = self.summarize_path();
        let text = render::render(&summary);

        let output_path = PathBuf::from(&self.config.output_path);
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ReportError::OutputWrite {
                    path: output_path.display().to_string(),
                    source: e,
                })?;
            }
        }
        std::fs::write(&output_path, &text).map_err(|e| ReportError::OutputWrite {
            path: output_path.display().to_string(),
            source: e,
        })?;

        info!(
            path = %output_path.display(),
            projects = summary.total_projects,
            vulnerabilities = summary.total_vulnerabilities,
            "scan summary written"
        );
        Ok(output_path)
    }

    /// 로딩 결과에서 요약 문서를 구성하고 협력자 장식을 적용합니다.
    fn build_summary(&self, outcome: LoadOutcome) -> SummaryDocument {
        let projects = outcome.documents.iter().map(normalize::normalize).collect();
        let mut summary = aggregate::aggregate(
            projects,
            outcome.availability,
            outcome.skipped_lines,
            self.config.spotlight_limit,
        );

        // 선택적 장식: 집계 정확성과 무관하며, 조회 실패는 무시됨
        if let Some(lookup) = &self.version_lookup {
            let packages: Vec<String> = summary.upgrade_index.keys().cloned().collect();
            for package in packages {
                let latest = lookup.latest_version(&package);
                if latest != UNKNOWN_VERSION {
                    summary.latest_versions.insert(package, latest);
                }
            }
        }

        summary
    }
}

/// [`ScanSummarizer`] 빌더
pub struct ScanSummarizerBuilder {
    config: ReportConfig,
    version_lookup: Option<Box<dyn VersionLookup>>,
}

impl ScanSummarizerBuilder {
    /// 기본 설정을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: ReportConfig::default(),
            version_lookup: None,
        }
    }

    /// 보고서 설정을 지정합니다.
    pub fn config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// 최신 버전 조회 협력자를 연결합니다.
    pub fn version_lookup(mut self, lookup: Box<dyn VersionLookup>) -> Self {
        self.version_lookup = Some(lookup);
        self
    }

    /// 설정을 검증하고 summarizer를 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `ReportError::Config` 반환
    pub fn build(self) -> Result<ScanSummarizer, ReportError> {
        self.config.validate()?;
        Ok(ScanSummarizer {
            config: self.config,
            version_lookup: self.version_lookup,
        })
    }
}

impl Default for ScanSummarizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
