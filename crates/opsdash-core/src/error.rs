//! OPSDASH 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 외부 에러를 `CoreError`로 매핑해서 반환한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 설정, 네트워크 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 백엔드가 에러 상태 코드를 반환함
    #[error("백엔드 에러 ({status}): {message}")]
    Backend {
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문 (있다면)
        message: String,
    },

    /// 리소스를 찾을 수 없음
    #[error("미발견: {0}")]
    NotFound(String),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}
