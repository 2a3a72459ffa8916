//! 도메인 데이터 모델.

pub mod marker;
pub mod series;

pub use marker::{AgentData, MarkerDetail, MarkerRecord};
pub use series::{DataPoint, SeriesRecord};
