use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::core::errors::AppError;
use crate::domain::entities::users::user::User;

/// `Protect` 미들웨어가 요청 확장 영역에 붙여 둔 인증 주체
///
/// 조회 시 선택된 숨김 필드(`passwordChangedAt`, 지정한 경우 `role`)만 채워져 있습니다.
/// 비밀번호 해시가 필요한 핸들러는 저장소에서 다시 읽어야 합니다.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn user(&self) -> &User {
        &self.0
    }

    /// 주체의 ObjectId 16진 문자열
    pub fn id(&self) -> String {
        self.0.id_string().unwrap_or_default()
    }
}

/// ActixWeb FromRequest trait 구현
///
/// `Protect`가 적용되지 않은 라우트에서 사용하면 401을 반환합니다.
impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "You are not logged in! Please provide a JWT".to_string(),
            ))),
        }
    }
}
