use serde::{Deserialize, Serialize};

use crate::domain::entities::users::user::{Role, User};

/// 사용자 응답 DTO
///
/// 비밀번호 해시, 변경 시각, 재설정 토큰은 필드 자체가 없습니다.
/// 역할은 조회 시 함께 읽힌 경우에만 포함됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub is_active: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            is_active: user.is_active,
        }
    }
}
