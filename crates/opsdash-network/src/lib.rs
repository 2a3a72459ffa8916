//! # opsdash-network
//!
//! `Transport` 포트의 네트워크 어댑터.
//!
//! - [`http_transport`] — reqwest 기반 HTTP 구현
//! - [`scheduler`] — 동시 요청 상한을 강제하는 Transport 래퍼

pub mod http_transport;
pub mod scheduler;

pub use http_transport::HttpTransport;
pub use scheduler::{RequestScheduler, SchedulerStats};
