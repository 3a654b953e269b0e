//! # Authentication Configuration Module
//!
//! 세션 토큰(JWT)과 비밀번호 재설정 메일 발송에 필요한 설정을 관리합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! ```
//!
//! ### 메일 릴레이 설정
//! ```bash
//! export MAIL_API_URL="https://mail-relay.internal/v1/send"
//! export MAIL_API_KEY="relay-api-key"
//! export MAIL_FROM="Challenge API <no-reply@challenge.dev>"
//! export MAIL_TIMEOUT_SECS="10"
//! ```
//!
//! `MAIL_API_URL`이 없으면 메일 내용을 로그로만 남기는 발송기가 사용됩니다.

use std::env;

use crate::config::data_config::env_or;

/// JWT 세션 토큰 설정
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 서명 비밀키
    ///
    /// - 최소 256비트 (32바이트) 길이
    /// - 환경별로 다른 키 사용
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub secret: String,
    /// 토큰 유효 시간 (시간 단위, 기본값 24)
    pub expiration_hours: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "your-secret-key".to_string()
        });

        Self {
            secret,
            expiration_hours: env_or("JWT_EXPIRATION_HOURS", 24),
        }
    }
}

/// 비밀번호 재설정 메일 발송 설정
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// HTTP 메일 릴레이 엔드포인트
    pub api_url: Option<String>,
    /// 릴레이 인증 키 (Bearer)
    pub api_key: Option<String>,
    /// 발신자 주소
    pub from: String,
    /// 릴레이 호출 제한 시간 (초)
    pub timeout_secs: u64,
}

impl MailConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("MAIL_API_URL").ok().filter(|url| !url.trim().is_empty()),
            api_key: env::var("MAIL_API_KEY").ok(),
            from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Challenge API <no-reply@localhost>".to_string()),
            timeout_secs: env_or("MAIL_TIMEOUT_SECS", 10),
        }
    }
}
