//! # Domain Models Module
//!
//! 영속되지 않는 도메인 값 객체를 정의합니다.
//!
//! - [`auth`] - 요청 컨텍스트에 붙는 인증 주체, 역할 요구 조건
//! - [`token`] - 세션 토큰 클레임, 일회용 재설정 토큰
//!
//! 엔티티(`../entities/`)와 달리 이 모듈의 타입은 요청 하나의 수명 동안만 존재합니다.

pub mod auth;
pub mod token;
