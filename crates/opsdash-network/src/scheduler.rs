//! 요청 스케줄러.
//!
//! 모든 위젯의 백엔드 조회가 거쳐 가는 동시성 게이트.
//! 동시 진행 요청을 상한 이하로 유지하고, 초과분은 도착 순서대로 대기시킨다.
//! tokio 세마포어는 FIFO이므로 대기 순서가 곧 실행 순서다.

use async_trait::async_trait;
use opsdash_core::error::CoreError;
use opsdash_core::ports::Transport;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// 스케줄러 현황
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStats {
    /// 진행 중인 요청 수
    pub in_flight: usize,
    /// 슬롯 대기 중인 요청 수
    pub queued: usize,
    /// 동시 진행 상한
    pub max_concurrent: usize,
}

/// 동시성 상한 Transport 래퍼
pub struct RequestScheduler {
    inner: Arc<dyn Transport>,
    permits: Arc<Semaphore>,
    max_concurrent: usize,
    in_flight: AtomicUsize,
    queued: AtomicUsize,
}

impl RequestScheduler {
    /// 내부 전송과 동시성 상한으로 스케줄러 생성
    pub fn new(inner: Arc<dyn Transport>, max_concurrent: usize) -> Self {
        Self {
            inner,
            permits: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
            in_flight: AtomicUsize::new(0),
            queued: AtomicUsize::new(0),
        }
    }

    /// 현재 스케줄러 현황 반환
    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            in_flight: self.in_flight.load(Ordering::Relaxed),
            queued: self.queued.load(Ordering::Relaxed),
            max_concurrent: self.max_concurrent,
        }
    }
}

#[async_trait]
impl Transport for RequestScheduler {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, CoreError> {
        self.queued.fetch_add(1, Ordering::Relaxed);

        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| CoreError::Internal("스케줄러가 닫혔습니다".to_string()));

        self.queued.fetch_sub(1, Ordering::Relaxed);
        let _permit = permit?;

        self.in_flight.fetch_add(1, Ordering::Relaxed);
        debug!("요청 시작: {url}");

        let result = self.inner.fetch_json(url).await;

        self.in_flight.fetch_sub(1, Ordering::Relaxed);
        // permit 드롭으로 슬롯 반납 — 성공/실패 무관
        result
    }
}
