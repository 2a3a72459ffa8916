//! 차트 위젯 포트.
//!
//! 수집 로직이 렌더러 구현과 분리되도록 차트 조작을 인터페이스로 추상화한다.

/// 차트 안의 시리즈를 가리키는 핸들
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesHandle(pub usize);

/// 시리즈 생성 메타데이터
#[derive(Debug, Clone, Default)]
pub struct SeriesMeta {
    /// 시리즈 표시 이름 (None = 이름 없음, pie 위젯용)
    pub name: Option<String>,
}

/// 차트에 추가할 점 하나
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    /// 타임스탬프 (밀리초)
    pub timestamp_ms: i64,
    /// 값 (None = 빈 버킷)
    pub value: Option<f64>,
}

/// 파이 조각 하나
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// 조각 라벨
    pub label: String,
    /// 전체 대비 비율 (0.0 ~ 1.0, 소수 셋째 자리 반올림)
    pub share: f64,
}

/// 차트 위젯 인터페이스
pub trait ChartWidget: Send + Sync {
    /// 시리즈를 추가하고 핸들을 반환한다
    fn add_series(&self, meta: SeriesMeta) -> SeriesHandle;

    /// 시리즈 끝에 점을 추가한다
    fn append_point(&self, handle: SeriesHandle, point: ChartPoint, animate: bool);

    /// 시리즈 데이터 전체를 파이 조각 목록으로 교체한다
    fn replace_data(&self, handle: SeriesHandle, slices: Vec<PieSlice>);

    /// 위젯을 폐기한다 (수집 중단 시)
    fn destroy(&self);
}
