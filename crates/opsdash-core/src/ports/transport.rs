//! 백엔드 전송 포트.

use crate::error::CoreError;
use async_trait::async_trait;

/// 백엔드 JSON 조회 인터페이스.
///
/// 스케줄러가 이 trait를 감싸 동시성 상한을 강제하므로,
/// 상위 레이어는 구현이 직접 HTTP인지 스케줄러 경유인지 구분하지 않는다.
#[async_trait]
pub trait Transport: Send + Sync {
    /// URL을 GET으로 조회해 JSON 본문을 반환한다
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, CoreError>;
}
