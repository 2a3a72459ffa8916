//! 대시보드 설정 구조체.
//!
//! 서버 URL, 요청 동시성, 위젯(그래프/지도) 정의 등 런타임 설정을 정의한다.
//! 위젯 필드는 소비하는 대시보드 설정 문서 형식에 맞춰 camelCase로 직렬화된다.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// 최상위 대시보드 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// 백엔드 연결 설정
    pub server: ServerConfig,
    /// 요청 스케줄러 설정
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// 위젯 정의 목록 (표시 순서 = 설정 순서)
    #[serde(default)]
    pub graphs: Vec<WidgetConfig>,
}

/// 백엔드 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 메트릭 백엔드 기본 URL (예: "https://stats.example.com")
    pub base_url: String,
    /// 메트릭 조회 엔드포인트 경로
    #[serde(default = "default_stats_path")]
    pub stats_path: String,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// 요청 스케줄러 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// 동시 진행 요청 상한
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
        }
    }
}

/// 위젯 표시 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Line,
    Area,
    Scatter,
    Column,
    Pie,
    Map,
}

impl WidgetKind {
    /// 시계열 누적 차트 여부 (pie/map 제외)
    pub fn is_cumulative(self) -> bool {
        !matches!(self, WidgetKind::Pie | WidgetKind::Map)
    }
}

/// 위젯(그래프/지도) 정의
///
/// 설정 문서의 한 항목. 차트 위젯은 `metrics` + `labelPattern`/`labels`를,
/// 지도 위젯은 `source`/`detail`을 사용한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    /// 위젯 식별자
    pub id: String,
    /// 표시 종류
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    /// 위젯 제목 (렌더링 힌트)
    #[serde(default)]
    pub title: Option<String>,
    /// 메트릭 패턴 목록 (와일드카드 `*` 허용)
    #[serde(default)]
    pub metrics: Vec<String>,
    /// 시리즈 라벨 템플릿 (`{n}` 자리에 와일드카드 캡처 대입)
    #[serde(default)]
    pub label_pattern: Option<String>,
    /// 경로 → 고정 라벨 테이블 (labelPattern이 없을 때 사용)
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// 조회 시간 범위 (상대 오프셋, 예: "-4hours")
    #[serde(default = "default_range")]
    pub range: String,
    /// 갱신 주기 (초). 0이면 1회 조회 후 중단
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate: u64,
    /// Y축 고정 최솟값 (렌더링 힌트)
    #[serde(default)]
    pub min_value: Option<f64>,
    /// 스태킹 모드 (렌더링 힌트, 예: "normal")
    #[serde(default)]
    pub stacking: Option<String>,
    /// 요약 집계 함수 (비-realtime 모드에서 summarize에 사용, 기본 "sum")
    #[serde(default)]
    pub sum_with: Option<String>,
    /// 지도 위젯 마커 피드 URL
    #[serde(default)]
    pub source: Option<String>,
    /// 지도 위젯 상세 조회 URL 접두사 (식별자를 뒤에 붙인다)
    #[serde(default)]
    pub detail: Option<String>,
}

impl WidgetConfig {
    /// 갱신 주기를 Duration으로 반환 (0 = 비활성)
    pub fn refresh_interval(&self) -> Option<Duration> {
        if self.refresh_rate == 0 {
            None
        } else {
            Some(Duration::from_secs(self.refresh_rate))
        }
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_stats_path() -> String {
    "/api/stats".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_max_concurrent() -> usize {
    2
}

fn default_range() -> String {
    "-4hours".to_string()
}

fn default_refresh_rate() -> u64 {
    60
}
