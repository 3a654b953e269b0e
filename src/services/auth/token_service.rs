//! JWT 세션 토큰 관리 서비스 구현
//!
//! HMAC-SHA256 서명으로 사용자 식별자와 발급 시각을 담은 토큰을 만들고 검증합니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::token::token::TokenClaims;

/// JWT 세션 토큰 서비스
///
/// 서명 키와 만료 시간은 시작 시점에 [`JwtConfig`]로 주입됩니다.
#[derive(Debug, Clone)]
pub struct TokenService {
    config: JwtConfig,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// 지금 시각으로 세션 토큰을 발급합니다.
    ///
    /// ```rust,ignore
    /// let token = token_service.issue_session_token(&user_id.to_hex())?;
    /// ```
    pub fn issue_session_token(&self, principal_id: &str) -> AppResult<String> {
        self.issue_session_token_at(principal_id, Utc::now())
    }

    /// 지정한 발급 시각으로 세션 토큰을 만듭니다.
    pub fn issue_session_token_at(&self, principal_id: &str, issued_at: DateTime<Utc>) -> AppResult<String> {
        let expiration = issued_at + Duration::hours(self.config.expiration_hours);

        let claims = TokenClaims {
            sub: principal_id.to_string(),
            iat: issued_at.timestamp(),
            iat_ms: issued_at.timestamp_millis(),
            exp: expiration.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.config.secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key).map_err(|e| {
            log::error!("JWT 토큰 생성 실패: {}", e);
            AppError::InternalError("Could not issue a session token. Please try again later.".to_string())
        })
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// 만료 판정에 여유 시간(leeway)을 두지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidToken` - 서명 불일치, 만료, 형식 오류
    pub fn verify_session_token(&self, token: &str) -> AppResult<TokenClaims> {
        let decoding_key = DecodingKey::from_secret(self.config.secret.as_ref());
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::InvalidToken("Your token has expired! Please login again.".to_string())
                }
                _ => AppError::InvalidToken("Invalid token. Please login again!".to_string()),
            })
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을 추출합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError(
                "You are not logged in! Please provide a JWT".to_string(),
            )),
        }
    }
}
