use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::CurrentUser;
use crate::middlewares::protect::Protect;

/// [`Protect`]가 생성하는 서비스
pub struct ProtectService<S> {
    pub service: Rc<S>,
    pub protect: Protect,
}

impl<S, B> Service<ServiceRequest> for ProtectService<S>
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
        let protect = self.protect.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string);

            match protect.authenticate(auth_header.as_deref()).await {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.id_string().unwrap_or_default());
                    req.extensions_mut().insert(CurrentUser(user));
                }
                Err(err) => {
                    log::warn!("인증 실패 ({} {}): {}", req.method(), req.path(), err);
                    return Ok(req.error_response(err).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
