//! 비밀번호 재설정용 일회용 토큰
//!
//! 무작위 바이트를 16진 문자열로 만들어 사용자에게 보내고,
//! 저장소에는 SHA-256 해시만 남깁니다.

use mongodb::bson::DateTime;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::models::token::token::OneTimeToken;

/// 재설정 토큰 바이트 길이
pub const RESET_TOKEN_BYTES: usize = 32;

/// 재설정 토큰 유효 시간 (15분)
pub const RESET_TOKEN_TTL_MS: i64 = 15 * 60 * 1000;

/// `byte_length` 바이트의 무작위 토큰을 발급합니다.
pub fn issue_one_time_token(byte_length: usize, expires_in_ms: i64) -> OneTimeToken {
    let mut bytes = vec![0u8; byte_length];
    rand::rng().fill_bytes(&mut bytes);

    let plaintext = hex::encode(&bytes);
    let hash = hash_token(&plaintext);
    let expires_at = DateTime::from_millis(DateTime::now().timestamp_millis() + expires_in_ms);

    OneTimeToken {
        plaintext,
        hash,
        expires_at,
    }
}

/// 평문 토큰의 SHA-256 16진 해시
pub fn hash_token(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}
