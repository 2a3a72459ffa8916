//! 시계열 응답 모델.
//!
//! 메트릭 백엔드의 JSON 응답 형식:
//! `[{"target": "<경로>", "datapoints": [[<값|null>, <유닉스 초>], ...]}]`

use serde::{Deserialize, Serialize};
use tracing::warn;

/// 시계열의 샘플 하나.
///
/// 와이어 형식은 `[value, timestamp]` 2요소 배열이다. 값이 `null`이면
/// 해당 버킷에 수집된 샘플이 없다는 뜻이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(Option<f64>, i64)", into = "(Option<f64>, i64)")]
pub struct DataPoint {
    /// 샘플 값 (None = 빈 버킷)
    pub value: Option<f64>,
    /// 유닉스 타임스탬프 (초)
    pub timestamp: i64,
}

impl From<(Option<f64>, i64)> for DataPoint {
    fn from((value, timestamp): (Option<f64>, i64)) -> Self {
        Self { value, timestamp }
    }
}

impl From<DataPoint> for (Option<f64>, i64) {
    fn from(point: DataPoint) -> Self {
        (point.value, point.timestamp)
    }
}

/// 시계열 하나 (확장된 메트릭 경로 + 샘플 목록)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesRecord {
    /// 백엔드가 확장해서 돌려준 실제 메트릭 경로
    pub target: String,
    /// 샘플 목록 (백엔드가 준 순서 그대로)
    pub datapoints: Vec<DataPoint>,
}

impl SeriesRecord {
    /// 응답 페이로드에서 시계열 목록을 파싱한다.
    ///
    /// 배열이 아니면 빈 목록을 반환하고, 형식이 깨진 항목은
    /// 경고 후 건너뛴다 (나머지 시계열은 계속 처리).
    pub fn from_payload(payload: &serde_json::Value) -> Vec<SeriesRecord> {
        let Some(items) = payload.as_array() else {
            warn!("시계열 응답이 배열이 아님: {}", payload);
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match serde_json::from_value(item.clone()) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("시계열 항목 파싱 실패 (건너뜀): {}", e);
                    None
                }
            })
            .collect()
    }
}
