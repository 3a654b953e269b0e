//! 인증 및 자격 증명 서비스 모듈
//!
//! # Features
//!
//! - bcrypt 비밀번호 해싱/검증
//! - HS256 세션 토큰 발급/검증
//! - 비밀번호 재설정용 일회용 토큰 발급 (SHA-256 해시만 저장)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{PasswordService, TokenService};
//!
//! let hash = passwords.hash_secret("secret1")?;
//! let token = tokens.issue_session_token(&user_id)?;
//! let claims = tokens.verify_session_token(&token)?;
//! ```

pub mod password_service;
pub mod token_service;
pub mod one_time_token;

pub use password_service::PasswordService;
pub use token_service::TokenService;
pub use one_time_token::{hash_token, issue_one_time_token, RESET_TOKEN_BYTES, RESET_TOKEN_TTL_MS};
