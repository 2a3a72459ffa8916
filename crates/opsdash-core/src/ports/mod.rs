//! Hexagonal Architecture 포트 인터페이스.
//!
//! 코어/대시보드 로직은 이 trait들에만 의존하고,
//! 구현은 어댑터 크레이트(opsdash-network, opsdash-app)가 제공한다.

pub mod chart;
pub mod factory;
pub mod map;
pub mod transport;

pub use chart::{ChartPoint, ChartWidget, PieSlice, SeriesHandle, SeriesMeta};
pub use factory::WidgetFactory;
pub use map::MapWidget;
pub use transport::Transport;
