//! 인증 주체와 역할 요구 조건

pub mod authenticated_user;
pub mod authentication_request;

pub use authenticated_user::CurrentUser;
pub use authentication_request::RequiredRole;
