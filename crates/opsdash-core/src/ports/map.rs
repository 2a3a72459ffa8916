//! 지도 위젯 포트.

use crate::models::MarkerRecord;

/// 지도 위젯 인터페이스
pub trait MapWidget: Send + Sync {
    /// 마커들을 지도에 추가한다
    fn add_markers(&self, markers: &[MarkerRecord]);

    /// 모든 마커를 제거한다
    fn clear_markers(&self);

    /// 마커의 상세 정보 창을 띄운다
    fn show_info(&self, marker_id: &str, html: &str);
}
