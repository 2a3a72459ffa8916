//! 전역 표시 모드.
//!
//! 대시보드 전체를 실시간/시간별/일별/주별 보기로 전환할 때
//! 위젯의 조회 범위와 메트릭 쿼리를 모드에 맞게 변환한다.

use chrono::Utc;
use std::fmt;
use std::str::FromStr;

/// 표시 모드
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// 실시간 (설정된 범위와 갱신 주기 그대로)
    #[default]
    Realtime,
    /// 최근 1일, 1시간 버킷
    Hourly,
    /// 최근 1주, 1일 버킷
    Daily,
    /// 최근 1개월, 1주 버킷
    Weekly,
}

impl DisplayMode {
    /// 비-realtime 모드의 summarize 버킷 크기
    fn bucket(self) -> Option<&'static str> {
        match self {
            DisplayMode::Realtime => None,
            DisplayMode::Hourly => Some("1h"),
            DisplayMode::Daily => Some("1d"),
            DisplayMode::Weekly => Some("1week"),
        }
    }

    /// 비-realtime 모드가 커버하는 과거 구간 (초)
    fn lookback_secs(self) -> Option<i64> {
        match self {
            DisplayMode::Realtime => None,
            DisplayMode::Hourly => Some(86_400),
            DisplayMode::Daily => Some(7 * 86_400),
            DisplayMode::Weekly => Some(31 * 86_400),
        }
    }

    /// 비-realtime 모드의 상대 범위 표기
    fn relative_range(self) -> Option<&'static str> {
        match self {
            DisplayMode::Realtime => None,
            DisplayMode::Hourly => Some("-1day"),
            DisplayMode::Daily => Some("-1week"),
            DisplayMode::Weekly => Some("-1month"),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisplayMode::Realtime => "realtime",
            DisplayMode::Hourly => "hourly",
            DisplayMode::Daily => "daily",
            DisplayMode::Weekly => "weekly",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "realtime" => Ok(DisplayMode::Realtime),
            "hourly" => Ok(DisplayMode::Hourly),
            "daily" => Ok(DisplayMode::Daily),
            "weekly" => Ok(DisplayMode::Weekly),
            other => Err(format!("알 수 없는 표시 모드: {}", other)),
        }
    }
}

/// 모드에 맞게 조회 범위를 변환한다.
///
/// realtime은 위젯 설정의 범위를 그대로 쓴다. 나머지 모드는
/// 상대 오프셋(`-1day` 등)으로 바꾸고, `absolute`가 켜져 있으면
/// (지도 피드처럼 상대 표기를 못 받는 소비자용) 현재 시각에서
/// 구간을 뺀 유닉스 초로 바꾼다.
pub fn adjust_range(mode: DisplayMode, base: &str, absolute: bool) -> String {
    match (mode.relative_range(), mode.lookback_secs()) {
        (Some(relative), Some(lookback)) => {
            if absolute {
                (Utc::now().timestamp() - lookback).to_string()
            } else {
                relative.to_string()
            }
        }
        _ => base.to_string(),
    }
}

/// 모드에 맞게 메트릭 쿼리를 변환한다.
///
/// 비-realtime 모드는 경로를 `summarize(<path>,'<bucket>','<fn>')`로
/// 감싼다. 집계 함수는 위젯의 `sumWith`, 없으면 "sum".
pub fn adjust_query(path: &str, mode: DisplayMode, sum_with: Option<&str>) -> String {
    match mode.bucket() {
        None => path.to_string(),
        Some(bucket) => {
            let agg = sum_with.unwrap_or("sum");
            format!("summarize({},'{}','{}')", path, bucket, agg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realtime_keeps_range_and_query() {
        assert_eq!(adjust_range(DisplayMode::Realtime, "-4hours", false), "-4hours");
        assert_eq!(
            adjust_query("servers.web01.cpu", DisplayMode::Realtime, Some("avg")),
            "servers.web01.cpu"
        );
    }

    #[test]
    fn hourly_range_is_one_day() {
        assert_eq!(adjust_range(DisplayMode::Hourly, "-4hours", false), "-1day");
        assert_eq!(adjust_range(DisplayMode::Daily, "-1h", false), "-1week");
        assert_eq!(adjust_range(DisplayMode::Weekly, "-1h", false), "-1month");
    }

    #[test]
    fn absolute_range_is_unix_seconds() {
        let before = Utc::now().timestamp() - 86_400;
        let range: i64 = adjust_range(DisplayMode::Hourly, "-4hours", true)
            .parse()
            .unwrap();
        let after = Utc::now().timestamp() - 86_400;
        assert!(range >= before && range <= after);
    }

    #[test]
    fn summarize_wraps_query() {
        assert_eq!(
            adjust_query("x.y", DisplayMode::Daily, Some("avg")),
            "summarize(x.y,'1d','avg')"
        );
        assert_eq!(
            adjust_query("x.y", DisplayMode::Hourly, None),
            "summarize(x.y,'1h','sum')"
        );
        assert_eq!(
            adjust_query("x.y", DisplayMode::Weekly, None),
            "summarize(x.y,'1week','sum')"
        );
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("hourly".parse::<DisplayMode>().unwrap(), DisplayMode::Hourly);
        assert_eq!("Realtime".parse::<DisplayMode>().unwrap(), DisplayMode::Realtime);
        assert!("monthly".parse::<DisplayMode>().is_err());
    }
}
