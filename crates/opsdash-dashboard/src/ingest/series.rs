//! 시계열 수집.
//!
//! 백엔드 응답을 차트 조작으로 변환한다. 누적 차트(line/area 등)는
//! 고수위 타임스탬프 이후의 새 점만 덧붙이고, 파이 차트는 매 주기
//! 마지막 샘플로 전체 비율을 다시 계산한다.

use opsdash_core::config::WidgetConfig;
use opsdash_core::models::SeriesRecord;
use opsdash_core::pattern;
use opsdash_core::ports::{ChartPoint, ChartWidget, PieSlice, SeriesHandle, SeriesMeta};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// 차트 위젯 하나의 시계열 수집기.
///
/// 응답에서 발견한 메트릭 경로마다 시리즈를 만들고, 이후 주기에서
/// 같은 경로의 새 샘플을 해당 시리즈에 이어 붙인다.
pub struct SeriesIngestor {
    config: WidgetConfig,
    chart: Arc<dyn ChartWidget>,
    /// 발견 순서대로의 메트릭 경로 → 시리즈 핸들
    paths: HashMap<String, SeriesHandle>,
    /// 파이 차트의 단일 시리즈 핸들
    pie_handle: Option<SeriesHandle>,
    /// 이미 반영한 샘플의 최신 타임스탬프 (유닉스 초)
    last_update: Option<i64>,
}

impl SeriesIngestor {
    pub fn new(config: WidgetConfig, chart: Arc<dyn ChartWidget>) -> Self {
        Self {
            config,
            chart,
            paths: HashMap::new(),
            pie_handle: None,
            last_update: None,
        }
    }

    /// 다음 조회의 시작 시점 (고수위). None이면 아직 첫 조회 전이다.
    pub fn high_water(&self) -> Option<i64> {
        self.last_update
    }

    /// 응답 페이로드를 위젯에 반영한다
    pub fn ingest(&mut self, payload: &serde_json::Value) {
        let records = SeriesRecord::from_payload(payload);
        if self.config.kind.is_cumulative() {
            self.ingest_cumulative(&records);
        } else {
            self.ingest_pie(&records);
        }
    }

    /// 수집 중단 시 위젯 폐기
    pub fn destroy(&self) {
        self.chart.destroy();
    }

    /// 누적 차트 수집: 고수위 이후의 샘플만 이어 붙인다
    fn ingest_cumulative(&mut self, records: &[SeriesRecord]) {
        let high_water = self.last_update;
        let first_load = high_water.is_none();
        let mut newest: Option<i64> = None;

        for record in records {
            if record.datapoints.is_empty() {
                continue;
            }

            let mut points = record.datapoints.clone();
            // 백엔드가 내림차순으로 줄 때만 뒤집어 오름차순을 보장
            if points.len() >= 2 && points[0].timestamp > points[points.len() - 1].timestamp {
                points.reverse();
            }
            // 마지막 버킷은 아직 채워지는 중일 수 있다 — 빈 값이면 버린다
            if points.last().is_some_and(|p| p.value.is_none()) {
                points.pop();
            }

            let handle = self.series_handle(&record.target);
            for point in &points {
                if high_water.is_some_and(|hw| point.timestamp <= hw) {
                    continue;
                }
                self.chart.append_point(
                    handle,
                    ChartPoint {
                        timestamp_ms: point.timestamp * 1000,
                        value: point.value,
                    },
                    !first_load,
                );
                newest = Some(newest.map_or(point.timestamp, |n| n.max(point.timestamp)));
            }
        }

        if let Some(ts) = newest {
            // 고수위는 단조 증가만 한다
            self.last_update = Some(self.last_update.map_or(ts, |old| old.max(ts)));
            debug!("{}: 고수위 갱신 → {}", self.config.id, ts);
        }
    }

    /// 파이 차트 수집: 매 주기 전체 비율을 다시 계산한다.
    ///
    /// 어느 한 경로라도 유효한 샘플이 없거나 합이 0이면
    /// 이전 표시를 유지한 채 주기를 통째로 건너뛴다.
    fn ingest_pie(&mut self, records: &[SeriesRecord]) {
        let mut values: Vec<(String, f64)> = Vec::with_capacity(records.len());

        for record in records {
            let path = pattern::strip_functions(&record.target);
            // 뒤에서부터 가장 최근의 유효 샘플을 찾는다
            let Some(value) = record
                .datapoints
                .iter()
                .rev()
                .find_map(|p| p.value)
            else {
                warn!("{}: 유효 샘플 없는 파이 경로 {} — 주기 건너뜀", self.config.id, path);
                return;
            };
            values.push((self.pie_label(path), value));
        }

        let sum: f64 = values.iter().map(|(_, v)| v).sum();
        if sum == 0.0 || !sum.is_finite() {
            warn!("{}: 파이 합계가 유효하지 않음 ({sum}) — 주기 건너뜀", self.config.id);
            return;
        }

        let mut slices = Vec::with_capacity(values.len());
        for (label, value) in values {
            let share = (value / sum * 1000.0).round() / 1000.0;
            if !share.is_finite() {
                warn!("{}: 파이 비율이 유효하지 않음 — 주기 건너뜀", self.config.id);
                return;
            }
            slices.push(PieSlice { label, share });
        }

        let handle = match self.pie_handle {
            Some(handle) => handle,
            None => {
                let handle = self.chart.add_series(SeriesMeta { name: None });
                self.pie_handle = Some(handle);
                handle
            }
        };
        self.chart.replace_data(handle, slices);
    }

    /// 경로의 시리즈 핸들을 찾거나, 라벨을 만들어 새 시리즈를 추가한다
    fn series_handle(&mut self, target: &str) -> SeriesHandle {
        if let Some(handle) = self.paths.get(target) {
            return *handle;
        }

        let label = self.series_label(target);
        let handle = self.chart.add_series(SeriesMeta { name: Some(label) });
        self.paths.insert(target.to_string(), handle);
        handle
    }

    /// 누적 차트 시리즈 라벨: 패턴 캡처 대입, 실패하면 경로 그대로
    fn series_label(&self, target: &str) -> String {
        let path = pattern::strip_functions(target);

        if let Some(template) = &self.config.label_pattern {
            if let Some(selected) = pattern::select_pattern(&self.config.metrics, path) {
                if let Some(captures) = pattern::match_captures(selected, path) {
                    return pattern::render_label(template, &captures);
                }
            }
        }

        path.to_string()
    }

    /// 파이 조각 라벨: labelPattern 우선, 없으면 labels 테이블, 둘 다 없으면 경로
    fn pie_label(&self, path: &str) -> String {
        if self.config.label_pattern.is_some() {
            return self.series_label(path);
        }
        self.config
            .labels
            .get(path)
            .cloned()
            .unwrap_or_else(|| path.to_string())
    }
}
