//! 역할 기반 접근 제한 미들웨어
//!
//! 반드시 `Protect` 안쪽에서 실행되어야 합니다.
//! 역할을 검사하려면 `Protect::with_fields(&["role"])`로 역할을 읽어 두어야 합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, Result,
};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::AppError;
use crate::domain::entities::users::user::Role;
use crate::domain::models::auth::{CurrentUser, RequiredRole};

#[derive(Debug, Clone)]
pub struct RestrictTo {
    required: RequiredRole,
}

impl RestrictTo {
    pub fn roles(roles: &[Role]) -> Self {
        Self {
            required: RequiredRole::from_roles(roles),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RestrictTo
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RestrictToService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RestrictToService {
            service: Rc::new(service),
            required: self.required.clone(),
        }))
    }
}

pub struct RestrictToService<S> {
    service: Rc<S>,
    required: RequiredRole,
}

impl<S, B> Service<ServiceRequest> for RestrictToService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        let role = req
            .extensions()
            .get::<CurrentUser>()
            .and_then(|current| current.user().role);
        let required = self.required.clone();

        Box::pin(async move {
            if !required.is_satisfied(role) {
                log::warn!("권한 부족: {:?}, 필요 권한: {:?} ({})", role, required, req.path());
                let err = AppError::AuthorizationError(
                    "You are not authorized to perform this action!".to_string(),
                );
                return Ok(req.error_response(err).map_into_right_body());
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
