//! 사용자 요청 DTO와 연산별 검증 스키마
//!
//! 스키마는 핸들러 팩토리에 전달되는 설정 데이터입니다.
//! 각 스키마의 키 목록이 곧 해당 연산의 필드 화이트리스트가 됩니다.

pub mod password_request;

pub use password_request::ForgotPasswordRequest;

use crate::utils::validation::{FieldType, Rule, Schema};

/// 회원가입 시 반드시 모두 있어야 하는 필드
///
/// `role`, `isActive`는 포함하지 않으므로 가입 요청으로 권한을 지정할 수 없습니다.
pub const SIGNUP_FIELDS: &[&str] = &["username", "email", "password", "confirmPassword"];

/// 회원가입 스키마
pub fn signup_schema() -> Schema {
    Schema::new()
        .field("username", FieldType::String)
        .rule(Rule::MinLength(1))
        .field("email", FieldType::String)
        .rule(Rule::Email)
        .field("password", FieldType::String)
        .rule(Rule::MinLength(1))
        .field("confirmPassword", FieldType::String)
}

/// 관리자용 사용자 수정 스키마
pub fn admin_update_schema() -> Schema {
    Schema::new()
        .field("username", FieldType::String)
        .field("email", FieldType::String)
        .rule(Rule::Email)
        .field("role", FieldType::String)
        .rule(Rule::OneOf(&["user", "admin"]))
        .field("isActive", FieldType::Boolean)
}

/// 본인 정보 수정 스키마
///
/// 자기 역할을 올리는 것을 막기 위해 `role`을 받지 않습니다.
pub fn update_me_schema() -> Schema {
    Schema::new()
        .field("username", FieldType::String)
        .field("email", FieldType::String)
        .rule(Rule::Email)
}
