//! 세션 토큰 인증 미들웨어
//!
//! ```text
//! Authorization 헤더 → Bearer 토큰 추출 → 서명/만료 검증
//!   → 주체 조회 → 비밀번호 변경 시각 확인 → 활성 상태 확인
//!   → CurrentUser를 요청 확장 영역에 추가
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::user::User;
use crate::middlewares::protect_inner::ProtectService;
use crate::repositories::model::{parse_object_id, Model};
use crate::services::auth::TokenService;

/// Protect가 항상 함께 읽는 숨김 필드
const ALWAYS_SELECTED: &[&str] = &["passwordChangedAt"];

/// 세션 토큰 인증 미들웨어
///
/// ```rust,ignore
/// web::get().to(handler).wrap(Protect::new(users, tokens))
/// web::post().to(handler).wrap(RestrictTo::roles(&[Role::Admin])).wrap(protect.with_fields(&["role"]))
/// ```
#[derive(Clone)]
pub struct Protect {
    users: Model<User>,
    tokens: Arc<TokenService>,
    extra_fields: Vec<String>,
}

impl Protect {
    pub fn new(users: Model<User>, tokens: Arc<TokenService>) -> Self {
        Self {
            users,
            tokens,
            extra_fields: Vec::new(),
        }
    }

    /// 이후 단계에서 필요한 숨김 필드(예: `role`)를 함께 읽도록 합니다.
    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.extra_fields.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    /// Authorization 헤더 값으로 주체를 확인합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 헤더 누락, 토큰 발급 이후 비밀번호 변경
    /// * `AppError::InvalidToken` - 서명 불일치, 만료
    /// * `AppError::NotFound` - 토큰 주체가 더 이상 없음
    /// * `AppError::AuthorizationError` - 비활성화된 계정
    pub async fn authenticate(&self, auth_header: Option<&str>) -> AppResult<User> {
        let header = auth_header.ok_or_else(|| {
            AppError::AuthenticationError("You are not logged in! Please provide a JWT".to_string())
        })?;

        let token = self.tokens.extract_bearer_token(header)?;
        let claims = self.tokens.verify_session_token(token)?;

        let id = parse_object_id(&claims.sub)
            .map_err(|_| AppError::InvalidToken("Invalid token. Please login again!".to_string()))?;

        let mut select: Vec<&str> = ALWAYS_SELECTED.to_vec();
        select.extend(self.extra_fields.iter().map(String::as_str));

        let user = self
            .users
            .find(mongodb::bson::doc! { "_id": id })
            .select(select.as_slice())
            .one()
            .await?
            .ok_or_else(|| AppError::NotFound("The user belonging to this token no longer exists!".to_string()))?;

        if user.changed_password_after(claims.iat_ms) {
            return Err(AppError::AuthenticationError(
                "Password was recently changed! Please login again!".to_string(),
            ));
        }

        if !user.is_active {
            return Err(AppError::AuthorizationError(
                "This account has been deactivated! Please login again to reactivate it.".to_string(),
            ));
        }

        Ok(user)
    }
}

impl<S, B> Transform<S, ServiceRequest> for Protect
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ProtectService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ProtectService {
            service: Rc::new(service),
            protect: self.clone(),
        }))
    }
}
