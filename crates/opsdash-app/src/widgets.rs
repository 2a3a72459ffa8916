//! 로그 출력 위젯.
//!
//! 렌더러 없는 터미널 실행용 포트 구현. 위젯 조작을
//! tracing 로그로 내보내 수집 파이프라인을 눈으로 확인할 수 있게 한다.

use opsdash_core::config::WidgetConfig;
use opsdash_core::models::MarkerRecord;
use opsdash_core::ports::{
    ChartPoint, ChartWidget, MapWidget, PieSlice, SeriesHandle, SeriesMeta, WidgetFactory,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

/// 시리즈 조작을 로그로 출력하는 차트 위젯
pub struct LogChartWidget {
    id: String,
    next_handle: AtomicUsize,
    names: Mutex<Vec<Option<String>>>,
}

impl LogChartWidget {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            next_handle: AtomicUsize::new(0),
            names: Mutex::new(Vec::new()),
        }
    }

    fn series_name(&self, handle: SeriesHandle) -> String {
        self.names
            .lock()
            .unwrap()
            .get(handle.0)
            .and_then(|n| n.clone())
            .unwrap_or_else(|| format!("#{}", handle.0))
    }
}

impl ChartWidget for LogChartWidget {
    fn add_series(&self, meta: SeriesMeta) -> SeriesHandle {
        let handle = SeriesHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));
        info!(
            "[{}] 시리즈 추가: {}",
            self.id,
            meta.name.as_deref().unwrap_or("(이름 없음)")
        );
        self.names.lock().unwrap().push(meta.name);
        handle
    }

    fn append_point(&self, handle: SeriesHandle, point: ChartPoint, _animate: bool) {
        info!(
            "[{}] {} @{}: {:?}",
            self.id,
            self.series_name(handle),
            point.timestamp_ms / 1000,
            point.value
        );
    }

    fn replace_data(&self, _handle: SeriesHandle, slices: Vec<PieSlice>) {
        let summary: Vec<String> = slices
            .iter()
            .map(|s| format!("{} {:.1}%", s.label, s.share * 100.0))
            .collect();
        info!("[{}] 파이 갱신: {}", self.id, summary.join(", "));
    }

    fn destroy(&self) {
        info!("[{}] 위젯 폐기", self.id);
    }
}

/// 마커 조작을 로그로 출력하는 지도 위젯
pub struct LogMapWidget {
    id: String,
}

impl MapWidget for LogMapWidget {
    fn add_markers(&self, markers: &[MarkerRecord]) {
        for marker in markers {
            info!(
                "[{}] 마커 추가: {} ({}, {})",
                self.id, marker.id, marker.loc[0], marker.loc[1]
            );
        }
    }

    fn clear_markers(&self) {
        info!("[{}] 마커 전체 제거", self.id);
    }

    fn show_info(&self, marker_id: &str, html: &str) {
        info!("[{}] 마커 {} 정보: {}", self.id, marker_id, html);
    }
}

/// 로그 위젯 팩토리
pub struct LogWidgetFactory;

impl WidgetFactory for LogWidgetFactory {
    fn create_chart(&self, config: &WidgetConfig) -> Arc<dyn ChartWidget> {
        Arc::new(LogChartWidget::new(&config.id))
    }

    fn create_map(&self, config: &WidgetConfig) -> Arc<dyn MapWidget> {
        Arc::new(LogMapWidget {
            id: config.id.clone(),
        })
    }
}
