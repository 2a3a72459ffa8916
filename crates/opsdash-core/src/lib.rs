//! # opsdash-core
//!
//! OPSDASH 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 도메인 데이터 구조체 (serde Serialize/Deserialize)
//! - [`ports`] — Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 대시보드/위젯 설정 구조체
//! - [`config_manager`] — 설정 파일 관리 (로드/저장)
//! - [`pattern`] — 와일드카드 메트릭 패턴 매칭 (순수 함수)
//! - [`mode`] — 전역 표시 모드와 범위/쿼리 변환 (순수 함수)
//! - [`query`] — 백엔드 조회 URL 빌더

pub mod config;
pub mod config_manager;
pub mod error;
pub mod mode;
pub mod models;
pub mod pattern;
pub mod ports;
pub mod query;
