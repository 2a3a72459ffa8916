//! 지도 마커 모델.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// 지도 마커 하나 (피드 응답 항목)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    /// 마커 식별자
    #[serde(rename = "_id")]
    pub id: String,
    /// 위치 [경도, 위도]
    pub loc: [f64; 2],
}

impl MarkerRecord {
    /// 피드 페이로드에서 마커 목록을 파싱한다.
    ///
    /// 형식이 깨진 항목은 경고 후 건너뛴다.
    pub fn from_payload(payload: &serde_json::Value) -> Vec<MarkerRecord> {
        let Some(items) = payload.as_array() else {
            warn!("마커 피드 응답이 배열이 아님: {}", payload);
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match serde_json::from_value(item.clone()) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("마커 항목 파싱 실패 (건너뜀): {}", e);
                    None
                }
            })
            .collect()
    }
}

/// 마커 상세 정보 (클릭 시 조회)
///
/// 모든 필드는 선택적이다. 빠진 필드는 기본값으로 채운다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkerDetail {
    /// 현재 연결 여부
    #[serde(default)]
    pub connected: bool,
    /// 마지막 접속 시각 (표시용 문자열)
    #[serde(default)]
    pub updated_at: String,
    /// 성공한 작업 수
    #[serde(default)]
    pub succeeded_jobs: u64,
    /// 실패한 작업 수
    #[serde(default)]
    pub failed_jobs: u64,
    /// 에이전트 메타데이터
    #[serde(default)]
    pub agent_data: AgentData,
}

/// 에이전트 메타데이터
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentData {
    /// 클라이언트 구성요소 종류 (예: "agent")
    #[serde(default)]
    pub component: String,
    /// 기여한 CPU 수
    #[serde(default)]
    pub cpus: Option<u32>,
}
