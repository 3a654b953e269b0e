//! bcrypt 기반 비밀번호 해싱

use crate::core::errors::{AppError, AppResult};

/// 비밀번호 해시 생성과 검증
///
/// cost는 [`PasswordConfig`](crate::config::PasswordConfig)에서 주입됩니다.
#[derive(Debug, Clone)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// 평문 비밀번호를 해시합니다.
    pub fn hash_secret(&self, plaintext: &str) -> AppResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            log::error!("비밀번호 해싱 실패: {}", e);
            AppError::InternalError("Could not store the password. Please try again later.".to_string())
        })
    }

    /// bcrypt 자체 검증 함수로 비교합니다.
    ///
    /// 저장된 해시가 손상되어 검증 자체가 실패하면 불일치로 취급합니다.
    pub fn verify_secret(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or_else(|e| {
            log::warn!("비밀번호 해시 검증 실패: {}", e);
            false
        })
    }
}
