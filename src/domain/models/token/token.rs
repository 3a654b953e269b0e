//! 세션 토큰 클레임과 일회용 재설정 토큰

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// JWT 세션 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 토큰의 주체 (사용자 ObjectId 16진 문자열)
/// - `iat`: 토큰 발급 시간 (Unix timestamp, 초)
/// - `iat_ms`: 토큰 발급 시간 (Unix timestamp, 밀리초). 비밀번호 변경 시각과 비교합니다.
/// - `exp`: 토큰 만료 시간 (Unix timestamp, 초)
///
/// 역할 정보는 담지 않습니다. 역할은 요청마다 저장소에서 다시 읽습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: i64,
    #[serde(default)]
    pub iat_ms: i64,
    pub exp: i64,
}

/// 발급된 일회용 토큰
///
/// `plaintext`는 메일로만 전달되고 저장되지 않습니다.
/// 저장소에는 `hash`와 `expires_at`만 기록됩니다.
#[derive(Debug, Clone)]
pub struct OneTimeToken {
    pub plaintext: String,
    pub hash: String,
    pub expires_at: DateTime,
}
