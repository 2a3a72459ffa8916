//! HTTP 전송 구현.
//!
//! `Transport` 포트의 reqwest 구현. 상태 코드를 `CoreError`로 매핑한다.

use async_trait::async_trait;
use opsdash_core::error::CoreError;
use opsdash_core::ports::Transport;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP GET 전송 — `Transport` 포트 구현
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// 지정된 타임아웃으로 전송 생성
    pub fn new(timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {}", e)))?;

        Ok(Self { client })
    }

    /// 응답 상태 코드 확인 및 에러 매핑
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let status_code = status.as_u16();
        let text = resp.text().await.unwrap_or_else(|e| {
            warn!("응답 본문 읽기 실패: {e}");
            String::new()
        });

        match status_code {
            404 => Err(CoreError::NotFound(text)),
            _ => Err(CoreError::Backend {
                status: status_code,
                message: text,
            }),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, CoreError> {
        debug!("백엔드 조회: {url}");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("요청 실패: {e}")))?;

        let resp = Self::check_response(resp).await?;

        let payload = resp
            .json::<serde_json::Value>()
            .await
            .map_err(|e| CoreError::Network(format!("응답 파싱 실패: {e}")))?;

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_json_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/stats?target=a.b.c&from=-4hours&format=json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"target":"a.b.c","datapoints":[[1.0,100]]}]"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/api/stats?target=a.b.c&from=-4hours&format=json", server.url());
        let payload = transport.fetch_json(&url).await.unwrap();

        assert!(payload.is_array());
        assert_eq!(payload[0]["target"], "a.b.c");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_maps_to_backend() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/stats")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/api/stats", server.url());
        let err = transport.fetch_json(&url).await.unwrap_err();

        assert!(matches!(err, CoreError::Backend { status: 500, .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn not_found_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/clients/missing")
            .with_status(404)
            .with_body("no such client")
            .create_async()
            .await;

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/api/clients/missing", server.url());
        let err = transport.fetch_json(&url).await.unwrap_err();

        assert!(matches!(err, CoreError::NotFound(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn invalid_json_is_network_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/stats")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/api/stats", server.url());
        let err = transport.fetch_json(&url).await.unwrap_err();

        assert!(matches!(err, CoreError::Network(_)));
        mock.assert_async().await;
    }
}
