//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 시작 시점에 [`AppConfig`](crate::config::AppConfig)에서 만든 값으로 생성되어
//! [`AppContext`](crate::core::context::AppContext)를 통해 핸들러와 미들웨어에 전달됩니다.
//!
//! - [`auth`] - 비밀번호, 세션 토큰, 일회용 토큰
//! - [`mail`] - 비밀번호 재설정 메일 발송

pub mod auth;
pub mod mail;
