//! 비밀번호 재설정 요청 DTO
use serde::Deserialize;
use validator::Validate;

/// 비밀번호 재설정 메일 요청
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email address submitted, please provide a valid email address."))]
    pub email: String,
}
