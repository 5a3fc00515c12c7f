//! 협력자 trait — 외부 연동 확장 포인트 정의
//!
//! 보고서 파이프라인 자체는 네트워크 I/O를 수행하지 않습니다.
//! 수정 제안(LLM), 변경 게시(소스 호스팅 API), 최신 버전 조회는
//! 이 trait들을 구현하는 외부 통합이 담당합니다.

use crate::error::VulnbriefError;

/// 버전 조회가 실패했을 때 사용하는 표식 값
pub const UNKNOWN_VERSION: &str = "unknown";

/// 의존성 매니페스트 수정 제안 trait
///
/// 렌더링된 보고서와 현재 매니페스트 텍스트를 받아
/// 교체용 매니페스트 텍스트를 제안합니다. 코어는 응답을 검증하거나
/// 적용하지 않습니다.
pub trait FixProposer: Send + Sync {
    /// 제안자 이름
    fn name(&self) -> &str;

    /// 보고서와 매니페스트를 기반으로 수정안을 생성
    fn propose(&self, report_text: &str, manifest_text: &str) -> Result<String, VulnbriefError>;
}

/// 변경 게시 trait
///
/// 제안된 매니페스트가 원본과 다를 때만 브랜치 생성, 커밋,
/// 리뷰 요청 생성을 수행합니다. 코어는 게시 성패에 의존하지 않습니다.
pub trait ChangePublisher: Send + Sync {
    /// 게시자 이름
    fn name(&self) -> &str;

    /// 수정안을 게시
    fn publish(&self, proposal: &str) -> Result<(), VulnbriefError>;
}

/// 패키지 최신 버전 조회 trait
///
/// 보고서 장식 용도로만 사용되며, 집계 정확성에는 관여하지 않습니다.
pub trait VersionLookup: Send + Sync {
    /// 패키지 좌표의 최신 알려진 버전을 반환합니다.
    ///
    /// 조회할 수 없으면 [`UNKNOWN_VERSION`] 표식을 반환합니다.
    fn latest_version(&self, package: &str) -> String;
}

/// 항상 [`UNKNOWN_VERSION`]을 반환하는 기본 구현
///
/// 네트워크 조회 없이 파이프라인을 구동할 때 사용합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownVersionLookup;

impl VersionLookup for UnknownVersionLookup {
    fn latest_version(&self, _package: &str) -> String {
        UNKNOWN_VERSION.to_owned()
    }
}
