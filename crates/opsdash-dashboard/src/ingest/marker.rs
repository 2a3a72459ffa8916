//! 지도 마커 수집.
//!
//! 피드 응답에서 새 마커만 지도에 추가하고, 마커 클릭 시
//! 상세 정보를 조회해 정보 창을 띄운다.

use chrono::Utc;
use opsdash_core::error::CoreError;
use opsdash_core::models::{MarkerDetail, MarkerRecord};
use opsdash_core::ports::{MapWidget, Transport};
use opsdash_core::query;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// 지도 위젯 하나의 마커 수집기
pub struct MarkerIngestor {
    map: Arc<dyn MapWidget>,
    transport: Arc<dyn Transport>,
    /// 상세 조회 URL 접두사
    detail_prefix: Option<String>,
    /// 이미 지도에 올라간 마커 식별자
    seen: HashSet<String>,
    /// 주기 내에서만 유효한 상세 정보 캐시
    details: Mutex<HashMap<String, MarkerDetail>>,
    /// 마지막 수집 시각 (유닉스 초)
    last_update: Option<i64>,
}

impl MarkerIngestor {
    pub fn new(
        map: Arc<dyn MapWidget>,
        transport: Arc<dyn Transport>,
        detail_prefix: Option<String>,
    ) -> Self {
        Self {
            map,
            transport,
            detail_prefix,
            seen: HashSet::new(),
            details: Mutex::new(HashMap::new()),
            last_update: None,
        }
    }

    /// 다음 조회의 시작 시점. None이면 아직 첫 조회 전이다.
    pub fn high_water(&self) -> Option<i64> {
        self.last_update
    }

    /// 피드 페이로드를 지도에 반영한다.
    ///
    /// 상세 캐시는 주기마다 비운다 — 갱신 사이에 바뀐 상태가
    /// 계속 보이는 것을 막는다.
    pub async fn ingest(&mut self, payload: &serde_json::Value) {
        self.details.lock().await.clear();

        let markers = MarkerRecord::from_payload(payload);
        let fresh: Vec<MarkerRecord> = markers
            .into_iter()
            .filter(|m| self.seen.insert(m.id.clone()))
            .collect();

        if !fresh.is_empty() {
            debug!("새 마커 {}개 추가", fresh.len());
            self.map.add_markers(&fresh);
        }

        self.last_update = Some(Utc::now().timestamp());
    }

    /// 마커 클릭 처리: 상세 조회 후 정보 창 표시
    pub async fn marker_clicked(&self, marker_id: &str) -> Result<(), CoreError> {
        let detail = self.detail(marker_id).await?;
        let html = format_detail(&detail);
        self.map.show_info(marker_id, &html);
        Ok(())
    }

    /// 마커 상세 조회 (주기 내 캐시)
    async fn detail(&self, marker_id: &str) -> Result<MarkerDetail, CoreError> {
        let mut cache = self.details.lock().await;
        if let Some(detail) = cache.get(marker_id) {
            return Ok(detail.clone());
        }

        let prefix = self
            .detail_prefix
            .as_deref()
            .ok_or_else(|| CoreError::Config("상세 조회 URL이 설정되지 않음".to_string()))?;

        let payload = self
            .transport
            .fetch_json(&query::detail_url(prefix, marker_id))
            .await?;
        let detail: MarkerDetail = serde_json::from_value(payload)?;

        cache.insert(marker_id.to_string(), detail.clone());
        Ok(detail)
    }

    /// 지도와 추적 상태를 모두 비운다
    pub fn clear(&mut self) {
        self.map.clear_markers();
        self.seen.clear();
    }
}

/// 상세 정보를 정보 창 HTML로 렌더링한다
fn format_detail(detail: &MarkerDetail) -> String {
    let status = if detail.connected { "online" } else { "offline" };
    let mut rows = vec![
        format!("<tr><th>Status</th><td>{}</td></tr>", status),
        format!("<tr><th>Last seen</th><td>{}</td></tr>", detail.updated_at),
    ];

    if detail.agent_data.component == "agent" {
        let total = detail.succeeded_jobs + detail.failed_jobs;
        let percent = if total > 0 {
            detail.succeeded_jobs as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        rows.push(format!(
            "<tr><th>Completed jobs</th><td>{}</td></tr>",
            total
        ));
        if let Some(cpus) = detail.agent_data.cpus {
            rows.push(format!(
                "<tr><th>Contributed CPUs</th><td>{}</td></tr>",
                cpus
            ));
        }
        rows.push(format!(
            "<tr><th>Succeeded</th><td>{} ({:.1}%)</td></tr>",
            detail.succeeded_jobs, percent
        ));
    } else {
        rows.push(format!(
            "<tr><th>Component</th><td>{}</td></tr>",
            detail.agent_data.component
        ));
    }

    format!("<table>{}</table>", rows.join(""))
}
