//! 위젯 갱신 루프.
//!
//! 위젯마다 태스크 하나가 조회→수집→대기를 반복한다.
//! 종료 신호는 두 군데서 확인한다: 대기 중에는 `select!`로 즉시 깨어나고,
//! 조회가 끝난 직후에는 결과를 버릴지 판단한다 — 종료 후 도착한 응답이
//! 폐기된 위젯을 건드리면 안 된다.

use crate::ingest::{MarkerIngestor, SeriesIngestor};
use opsdash_core::config::WidgetConfig;
use opsdash_core::ports::Transport;
use opsdash_core::query;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, warn};

/// 차트 위젯 갱신 루프
pub struct ChartRefreshLoop {
    config: WidgetConfig,
    base_url: String,
    stats_path: String,
    transport: Arc<dyn Transport>,
    ingestor: SeriesIngestor,
}

impl ChartRefreshLoop {
    pub fn new(
        config: WidgetConfig,
        base_url: String,
        stats_path: String,
        transport: Arc<dyn Transport>,
        ingestor: SeriesIngestor,
    ) -> Self {
        Self {
            config,
            base_url,
            stats_path,
            transport,
            ingestor,
        }
    }

    /// 종료 신호가 올 때까지 조회와 수집을 반복한다
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) {
        loop {
            // 증분 조회: 고수위가 있으면 그 지점부터
            let from = match self.ingestor.high_water() {
                Some(ts) => ts.to_string(),
                None => self.config.range.clone(),
            };
            let url =
                query::chart_query_url(&self.base_url, &self.stats_path, &self.config.metrics, &from);

            match self.transport.fetch_json(&url).await {
                Ok(payload) => {
                    // 조회 중에 종료됐다면 응답을 버린다
                    if *shutdown_rx.borrow() {
                        break;
                    }
                    self.ingestor.ingest(&payload);
                }
                Err(e) => {
                    warn!("{}: 조회 실패 — {}", self.config.id, e);
                }
            }

            let Some(interval) = self.config.refresh_interval() else {
                debug!("{}: 1회 조회 완료, 갱신 비활성", self.config.id);
                break;
            };

            tokio::select! {
                _ = sleep(interval) => {}
                _ = shutdown_rx.changed() => break,
            }
        }

        self.ingestor.destroy();
        debug!("{}: 갱신 루프 종료", self.config.id);
    }
}

/// 지도 위젯 갱신 루프
pub struct MapRefreshLoop {
    config: WidgetConfig,
    transport: Arc<dyn Transport>,
    ingestor: MarkerIngestor,
    /// 첫 조회에서 allactive를 붙일지 (실시간 모드에서만)
    all_active_on_first: bool,
}

impl MapRefreshLoop {
    pub fn new(
        config: WidgetConfig,
        transport: Arc<dyn Transport>,
        ingestor: MarkerIngestor,
        all_active_on_first: bool,
    ) -> Self {
        Self {
            config,
            transport,
            ingestor,
            all_active_on_first,
        }
    }

    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) {
        let Some(source) = self.config.source.clone() else {
            warn!("{}: 지도 위젯에 source가 없음", self.config.id);
            return;
        };

        loop {
            let first = self.ingestor.high_water().is_none();
            let from = match self.ingestor.high_water() {
                Some(ts) => ts.to_string(),
                None => self.config.range.clone(),
            };
            let url = query::map_query_url(&source, &from, first && self.all_active_on_first);

            match self.transport.fetch_json(&url).await {
                Ok(payload) => {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                    self.ingestor.ingest(&payload).await;
                }
                Err(e) => {
                    warn!("{}: 마커 피드 조회 실패 — {}", self.config.id, e);
                }
            }

            let Some(interval) = self.config.refresh_interval() else {
                debug!("{}: 1회 조회 완료, 갱신 비활성", self.config.id);
                break;
            };

            tokio::select! {
                _ = sleep(interval) => {}
                _ = shutdown_rx.changed() => break,
            }
        }

        self.ingestor.clear();
        debug!("{}: 갱신 루프 종료", self.config.id);
    }
}
