//! 대시보드 컨트롤러.
//!
//! 위젯별 갱신 태스크의 수명과 전역 표시 모드를 관리한다.
//! 모드 전환은 전체 재구축이다: 모든 위젯을 내리고, 모드에 맞게
//! 조정한 설정으로 처음부터 다시 올린다.

use crate::ingest::{MarkerIngestor, SeriesIngestor};
use crate::refresh::{ChartRefreshLoop, MapRefreshLoop};
use opsdash_core::config::{DashboardConfig, WidgetConfig, WidgetKind};
use opsdash_core::mode::{self, DisplayMode};
use opsdash_core::ports::{Transport, WidgetFactory};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// 실행 중인 위젯 하나
struct WidgetRuntime {
    id: String,
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// 대시보드 컨트롤러
pub struct DashboardController {
    config: DashboardConfig,
    transport: Arc<dyn Transport>,
    factory: Arc<dyn WidgetFactory>,
    mode: DisplayMode,
    widgets: Vec<WidgetRuntime>,
}

impl DashboardController {
    pub fn new(
        config: DashboardConfig,
        transport: Arc<dyn Transport>,
        factory: Arc<dyn WidgetFactory>,
        mode: DisplayMode,
    ) -> Self {
        Self {
            config,
            transport,
            factory,
            mode,
            widgets: Vec::new(),
        }
    }

    /// 현재 표시 모드
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// 실행 중인 위젯 수
    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// 설정된 모든 위젯의 갱신 태스크를 시작한다
    pub fn start(&mut self) {
        info!("대시보드 시작: 위젯 {}개, 모드 {}", self.config.graphs.len(), self.mode);

        for widget_config in self.config.graphs.clone() {
            let adjusted = adjust_for_mode(widget_config, self.mode);
            self.spawn_widget(adjusted);
        }
    }

    /// 표시 모드를 전환한다 — 전체 위젯 재구축
    pub async fn switch_mode(&mut self, mode: DisplayMode) {
        if mode == self.mode {
            debug!("이미 {} 모드", mode);
            return;
        }

        info!("모드 전환: {} → {}", self.mode, mode);
        self.teardown().await;
        self.mode = mode;
        self.start();
    }

    /// 모든 위젯을 내리고 종료한다
    pub async fn shutdown(&mut self) {
        info!("대시보드 종료");
        self.teardown().await;
    }

    /// 위젯 하나의 갱신 태스크를 띄운다
    fn spawn_widget(&mut self, config: WidgetConfig) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let id = config.id.clone();

        let handle = match config.kind {
            WidgetKind::Map => {
                let map = self.factory.create_map(&config);
                let ingestor =
                    MarkerIngestor::new(map, self.transport.clone(), config.detail.clone());
                let all_active = self.mode == DisplayMode::Realtime;
                let refresh =
                    MapRefreshLoop::new(config, self.transport.clone(), ingestor, all_active);
                tokio::spawn(refresh.run(shutdown_rx))
            }
            _ => {
                let chart = self.factory.create_chart(&config);
                let ingestor = SeriesIngestor::new(config.clone(), chart);
                let refresh = ChartRefreshLoop::new(
                    config,
                    self.config.server.base_url.clone(),
                    self.config.server.stats_path.clone(),
                    self.transport.clone(),
                    ingestor,
                );
                tokio::spawn(refresh.run(shutdown_rx))
            }
        };

        debug!("위젯 시작: {id}");
        self.widgets.push(WidgetRuntime {
            id,
            shutdown_tx,
            handle,
        });
    }

    /// 모든 태스크에 종료를 알리고 끝날 때까지 기다린다.
    ///
    /// abort가 아니라 join이다 — 진행 중인 조회가 끝나고 루프가
    /// 응답을 버린 뒤 위젯을 정리하도록 둔다.
    async fn teardown(&mut self) {
        for widget in &self.widgets {
            widget.shutdown_tx.send(true).ok();
        }

        for widget in self.widgets.drain(..) {
            if let Err(e) = widget.handle.await {
                warn!("위젯 {} 태스크 종료 실패: {}", widget.id, e);
            }
        }
    }
}

/// 위젯 설정을 표시 모드에 맞게 조정한다.
///
/// 비-realtime 모드는 과거 구간 조회이므로 주기 갱신을 끄고(1회 조회),
/// 범위를 모드 구간으로, 메트릭을 summarize 호출로 바꾼다.
/// 지도 피드는 상대 범위 표기를 못 받으므로 절대 시각을 쓴다.
fn adjust_for_mode(mut config: WidgetConfig, mode: DisplayMode) -> WidgetConfig {
    if mode == DisplayMode::Realtime {
        return config;
    }

    config.refresh_rate = 0;
    let absolute = config.kind == WidgetKind::Map;
    config.range = mode::adjust_range(mode, &config.range, absolute);

    if config.kind != WidgetKind::Map {
        let sum_with = config.sum_with.clone();
        config.metrics = config
            .metrics
            .iter()
            .map(|m| mode::adjust_query(m, mode, sum_with.as_deref()))
            .collect();
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use opsdash_core::error::CoreError;
    use opsdash_core::models::MarkerRecord;
    use opsdash_core::ports::{
        ChartPoint, ChartWidget, MapWidget, PieSlice, SeriesHandle, SeriesMeta,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NullTransport;

    #[async_trait]
    impl Transport for NullTransport {
        async fn fetch_json(&self, _url: &str) -> Result<serde_json::Value, CoreError> {
            Ok(json!([]))
        }
    }

    struct NullChart;

    impl ChartWidget for NullChart {
        fn add_series(&self, _meta: SeriesMeta) -> SeriesHandle {
            SeriesHandle(0)
        }
        fn append_point(&self, _handle: SeriesHandle, _point: ChartPoint, _animate: bool) {}
        fn replace_data(&self, _handle: SeriesHandle, _slices: Vec<PieSlice>) {}
        fn destroy(&self) {}
    }

    struct NullMap;

    impl MapWidget for NullMap {
        fn add_markers(&self, _markers: &[MarkerRecord]) {}
        fn clear_markers(&self) {}
        fn show_info(&self, _marker_id: &str, _html: &str) {}
    }

    #[derive(Default)]
    struct CountingFactory {
        charts: AtomicUsize,
        maps: AtomicUsize,
    }

    impl WidgetFactory for CountingFactory {
        fn create_chart(&self, _config: &WidgetConfig) -> Arc<dyn ChartWidget> {
            self.charts.fetch_add(1, Ordering::SeqCst);
            Arc::new(NullChart)
        }

        fn create_map(&self, _config: &WidgetConfig) -> Arc<dyn MapWidget> {
            self.maps.fetch_add(1, Ordering::SeqCst);
            Arc::new(NullMap)
        }
    }

    fn sample_config() -> DashboardConfig {
        serde_json::from_value(json!({
            "server": {"base_url": "http://stats.local"},
            "graphs": [
                {"id": "cpu", "type": "line", "metrics": ["servers.*.cpu"], "refreshRate": 3600},
                {"id": "share", "type": "pie", "metrics": ["jobs.*.count"], "refreshRate": 3600},
                {"id": "clients", "type": "map", "source": "/api/clients", "refreshRate": 3600}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn start_spawns_all_widgets() {
        let factory = Arc::new(CountingFactory::default());
        let mut controller = DashboardController::new(
            sample_config(),
            Arc::new(NullTransport),
            factory.clone(),
            DisplayMode::Realtime,
        );

        controller.start();
        assert_eq!(controller.widget_count(), 3);
        assert_eq!(factory.charts.load(Ordering::SeqCst), 2);
        assert_eq!(factory.maps.load(Ordering::SeqCst), 1);

        controller.shutdown().await;
        assert_eq!(controller.widget_count(), 0);
    }

    #[tokio::test]
    async fn switch_mode_rebuilds_widgets() {
        let factory = Arc::new(CountingFactory::default());
        let mut controller = DashboardController::new(
            sample_config(),
            Arc::new(NullTransport),
            factory.clone(),
            DisplayMode::Realtime,
        );

        controller.start();
        controller.switch_mode(DisplayMode::Hourly).await;

        assert_eq!(controller.mode(), DisplayMode::Hourly);
        assert_eq!(controller.widget_count(), 3);
        // 위젯이 폐기 후 새로 만들어졌다
        assert_eq!(factory.charts.load(Ordering::SeqCst), 4);
        assert_eq!(factory.maps.load(Ordering::SeqCst), 2);

        controller.shutdown().await;
    }

    #[tokio::test]
    async fn switch_to_same_mode_is_noop() {
        let factory = Arc::new(CountingFactory::default());
        let mut controller = DashboardController::new(
            sample_config(),
            Arc::new(NullTransport),
            factory.clone(),
            DisplayMode::Realtime,
        );

        controller.start();
        controller.switch_mode(DisplayMode::Realtime).await;
        assert_eq!(factory.charts.load(Ordering::SeqCst), 2);

        controller.shutdown().await;
    }

    #[test]
    fn non_realtime_mode_adjusts_chart_config() {
        let config: WidgetConfig = serde_json::from_value(json!({
            "id": "cpu",
            "type": "line",
            "metrics": ["servers.web01.cpu"],
            "sumWith": "avg",
            "range": "-4hours",
            "refreshRate": 60
        }))
        .unwrap();

        let adjusted = adjust_for_mode(config, DisplayMode::Daily);
        assert_eq!(adjusted.refresh_rate, 0);
        assert_eq!(adjusted.range, "-1week");
        assert_eq!(adjusted.metrics, vec!["summarize(servers.web01.cpu,'1d','avg')"]);
    }

    #[test]
    fn non_realtime_mode_gives_map_absolute_range() {
        let config: WidgetConfig = serde_json::from_value(json!({
            "id": "clients",
            "type": "map",
            "source": "/api/clients",
            "range": "-1day",
            "refreshRate": 60
        }))
        .unwrap();

        let adjusted = adjust_for_mode(config, DisplayMode::Hourly);
        assert_eq!(adjusted.refresh_rate, 0);
        // 절대 유닉스 초로 바뀐다
        assert!(adjusted.range.parse::<i64>().is_ok());
    }

    #[test]
    fn realtime_mode_keeps_config() {
        let config: WidgetConfig = serde_json::from_value(json!({
            "id": "cpu",
            "type": "line",
            "metrics": ["servers.web01.cpu"],
            "range": "-4hours",
            "refreshRate": 60
        }))
        .unwrap();

        let adjusted = adjust_for_mode(config.clone(), DisplayMode::Realtime);
        assert_eq!(adjusted.range, config.range);
        assert_eq!(adjusted.refresh_rate, 60);
        assert_eq!(adjusted.metrics, config.metrics);
    }
}
