//! 응답 수집.

pub mod marker;
pub mod series;

pub use marker::MarkerIngestor;
pub use series::SeriesIngestor;
