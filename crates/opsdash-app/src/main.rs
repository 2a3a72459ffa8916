//! # opsdash-app
//!
//! OPSDASH 클라이언트 바이너리 진입점.
//! DI 컨테이너 역할: 전송/스케줄러/팩토리를 엮어 컨트롤러를 띄운다.

mod widgets;

use anyhow::Result;
use clap::Parser;
use opsdash_core::config_manager::ConfigManager;
use opsdash_core::mode::DisplayMode;
use opsdash_dashboard::DashboardController;
use opsdash_network::{HttpTransport, RequestScheduler};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::widgets::LogWidgetFactory;

/// OPSDASH 운영 대시보드 클라이언트
///
/// 메트릭 백엔드를 주기 조회해 위젯을 갱신한다
#[derive(Parser, Debug)]
#[command(name = "opsdash")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 대시보드 설정 파일 경로
    #[arg(long, short = 'c', default_value = "dashboard.json")]
    config: PathBuf,

    /// 서버 URL 오버라이드
    #[arg(long, short = 's')]
    server: Option<String>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 시작 표시 모드 (realtime, hourly, daily, weekly)
    #[arg(long, short = 'm', default_value = "realtime")]
    mode: DisplayMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // tracing 초기화
    let log_filter = format!(
        "opsdash_app={},opsdash_core={},opsdash_network={},opsdash_dashboard={}",
        args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("OPSDASH 클라이언트 시작");

    // 설정 로드
    let config_manager = ConfigManager::with_path(args.config)?;
    let mut config = config_manager.get();

    // CLI 인자로 설정 오버라이드
    if let Some(server_url) = args.server {
        config.server.base_url = server_url;
    }
    info!("서버: {}", config.server.base_url);

    // ── 어댑터 생성 (DI 와이어링) ──

    // 1. HTTP 전송 + 요청 스케줄러
    let http = Arc::new(HttpTransport::new(config.server.request_timeout())?);
    let transport = Arc::new(RequestScheduler::new(http, config.scheduler.max_concurrent));
    info!("요청 동시성 상한: {}", config.scheduler.max_concurrent);

    // 2. 위젯 팩토리 (터미널 실행은 로그 출력)
    let factory = Arc::new(LogWidgetFactory);

    // 3. 컨트롤러
    let mut controller = DashboardController::new(config, transport, factory, args.mode);
    controller.start();

    info!("OPSDASH 실행 중 (Ctrl+C로 종료)");
    tokio::signal::ctrl_c().await?;

    controller.shutdown().await;
    info!("OPSDASH 클라이언트 종료");
    Ok(())
}
