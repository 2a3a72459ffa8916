//! # opsdash-dashboard
//!
//! 대시보드 로직: 응답 수집, 위젯 갱신 루프, 전역 컨트롤러.
//!
//! - [`ingest`] — 시계열/마커 응답을 위젯 조작으로 변환
//! - [`refresh`] — 위젯별 주기 갱신 루프
//! - [`controller`] — 위젯 수명과 전역 표시 모드 관리

pub mod controller;
pub mod ingest;
pub mod refresh;

pub use controller::DashboardController;
