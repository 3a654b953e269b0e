//! User Entity Implementation
//!
//! 인증 주체를 표현하는 사용자 엔티티입니다.
//! 해시된 비밀번호, 역할, 비밀번호 변경 시각, 재설정 토큰 해시는 숨김 필드로
//! 기본 조회에서 제외되며, 외부 표현([`UserResponse`])에는 절대 포함되지 않습니다.

use mongodb::bson::{oid::ObjectId, Bson, DateTime, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::ValidateEmail;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::response::UserResponse;
use crate::domain::entities::{required_field_messages, Entity, WriteKind};
use crate::services::auth::PasswordService;
use crate::utils::validation::FieldType;

/// 사용자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이름 (unique)
    #[serde(default)]
    pub username: String,
    /// 사용자 이메일 (unique)
    #[serde(default)]
    pub email: String,
    /// bcrypt 해시 (숨김)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// 사용자 역할 (숨김)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// 계정 활성화 여부
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// 마지막 비밀번호 변경 시각 (숨김)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_changed_at: Option<DateTime>,
    /// 재설정 토큰의 SHA-256 해시 (숨김)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_reset_token: Option<String>,
    /// 재설정 토큰 만료 시각 (숨김)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_reset_token_expiration: Option<DateTime>,
}

fn default_active() -> bool {
    true
}

const REQUIRED_ON_WRITE: &[(&str, &str)] = &[
    ("username", "Please select a username!"),
    ("email", "Please provide a valid email!"),
    ("password", "Please type in a password!"),
];

impl User {
    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 토큰 발급(`iat_ms`, 밀리초) 이후에 비밀번호가 변경되었는지 확인합니다.
    ///
    /// 변경 시각이 발급 시각과 같거나 그 이후이면 참입니다.
    pub fn changed_password_after(&self, issued_at_ms: i64) -> bool {
        match self.password_changed_at {
            Some(changed_at) => changed_at.timestamp_millis() >= issued_at_ms,
            None => false,
        }
    }

    /// 재설정 토큰 만료 여부
    pub fn reset_token_expired(&self, now: DateTime) -> bool {
        match self.password_reset_token_expiration {
            Some(expires_at) => expires_at.timestamp_millis() <= now.timestamp_millis(),
            None => true,
        }
    }
}

impl Entity for User {
    const COLLECTION: &'static str = "users";

    const HIDDEN_FIELDS: &'static [&'static str] = &[
        "password",
        "role",
        "passwordChangedAt",
        "passwordResetToken",
        "passwordResetTokenExpiration",
    ];

    const UNIQUE_FIELDS: &'static [&'static str] = &["email", "username"];

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn to_public(&self) -> Value {
        serde_json::to_value(UserResponse::from(self)).unwrap_or(Value::Null)
    }

    fn field_type(field: &str) -> Option<FieldType> {
        match field {
            "username" | "email" | "role" => Some(FieldType::String),
            "isActive" => Some(FieldType::Boolean),
            _ => None,
        }
    }

    /// 저장 전 훅
    ///
    /// - 이메일 형식과 필수 필드 검사
    /// - `confirmPassword`가 있으면 `password`와 같은지 확인한 뒤 제거
    /// - `password`가 설정되면 해싱하고, 생성이 아닌 경우 `passwordChangedAt` 갱신
    /// - 생성 시 `role`, `isActive` 기본값 채우기
    fn prepare_write(doc: &mut Document, kind: WriteKind, passwords: &PasswordService) -> AppResult<()> {
        let mut messages = required_field_messages(doc, REQUIRED_ON_WRITE, kind);

        if let Some(Bson::String(email)) = doc.get("email") {
            if !email.trim().is_empty() && !email.validate_email() {
                messages.push("email: Please provide a valid email!".to_string());
            }
        }

        let confirm = doc.get("confirmPassword").cloned();
        match (kind, confirm) {
            (WriteKind::Create, None) => {
                messages.push("confirmPassword: Please confirm your password!".to_string());
            }
            (_, Some(confirm)) if confirm.as_str() != doc.get("password").and_then(Bson::as_str) => {
                messages.push("confirmPassword: Passwords do not match!".to_string());
            }
            _ => {}
        }

        if !messages.is_empty() {
            return Err(AppError::ValidationError(messages));
        }

        doc.remove("confirmPassword");

        if let Some(plaintext) = doc.get("password").and_then(Bson::as_str).map(str::to_string) {
            doc.insert("password", passwords.hash_secret(&plaintext)?);

            if kind == WriteKind::Update {
                doc.insert("passwordChangedAt", DateTime::now());
            }
        }

        if kind == WriteKind::Create {
            if !doc.contains_key("role") {
                doc.insert("role", Role::User.as_str());
            }
            if !doc.contains_key("isActive") {
                doc.insert("isActive", true);
            }
        }

        Ok(())
    }
}
