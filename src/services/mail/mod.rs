//! # 메일 발송 협력자
//!
//! 비밀번호 재설정 토큰을 사용자에게 전달하는 외부 발송 경로입니다.
//! 발송은 한 번만 시도하며(재시도 없음), 제한 시간을 넘기면 실패로 처리합니다.
//!
//! - [`HttpMailer`] - HTTP 메일 릴레이로 JSON 요청을 보냄
//! - [`LogMailer`] - 릴레이가 설정되지 않은 환경에서 내용을 로그로만 남김

pub mod mail_service;

pub use mail_service::*;
