//! 백엔드 조회 URL 빌더.

use url::form_urlencoded;

/// 차트 시계열 조회 URL을 만든다.
///
/// `target` 파라미터를 메트릭마다 반복하고 `from`으로 시작 시점을 지정한다.
/// 응답 형식은 JSON 고정이다.
pub fn chart_query_url(base_url: &str, stats_path: &str, metrics: &[String], from: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for metric in metrics {
        query.append_pair("target", metric);
    }
    query.append_pair("from", from);
    query.append_pair("format", "json");

    format!(
        "{}{}?{}",
        base_url.trim_end_matches('/'),
        stats_path,
        query.finish()
    )
}

/// 지도 마커 피드 조회 URL을 만든다.
///
/// 첫 실시간 조회에서만 `allactive=true`를 붙여 현재 활성 마커 전체를 받는다.
pub fn map_query_url(source: &str, from: &str, all_active: bool) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("from", from);
    if all_active {
        query.append_pair("allactive", "true");
    }

    format!("{}?{}", source, query.finish())
}

/// 마커 상세 조회 URL을 만든다 (접두사 + 식별자).
pub fn detail_url(prefix: &str, id: &str) -> String {
    format!("{}{}", prefix, id)
}
