//! 위젯 생성 포트.

use crate::config::WidgetConfig;
use crate::ports::{ChartWidget, MapWidget};
use std::sync::Arc;

/// 위젯 팩토리 인터페이스.
///
/// 컨트롤러가 모드 전환 시 위젯을 폐기하고 새로 만들 때 사용한다.
pub trait WidgetFactory: Send + Sync {
    /// 설정에 맞는 차트 위젯을 만든다
    fn create_chart(&self, config: &WidgetConfig) -> Arc<dyn ChartWidget>;

    /// 설정에 맞는 지도 위젯을 만든다
    fn create_map(&self, config: &WidgetConfig) -> Arc<dyn MapWidget>;
}
