//! 인증/인가 미들웨어
//!
//! - [`Protect`] - Bearer 세션 토큰으로 요청 주체를 확인하고 `CurrentUser`를 붙입니다.
//! - [`RestrictTo`] - 확인된 주체의 역할을 검사합니다.
//!
//! actix-web의 `wrap`은 마지막에 등록한 미들웨어가 가장 먼저 실행되므로
//! `RestrictTo`를 먼저, `Protect`를 나중에 등록합니다.
//!
//! ```rust,ignore
//! web::delete()
//!     .to(handler)
//!     .wrap(RestrictTo::roles(&[Role::Admin]))
//!     .wrap(ctx.protect().with_fields(&["role"]))
//! ```

pub mod protect;
mod protect_inner;
pub mod restrict_to;

pub use protect::Protect;
pub use restrict_to::RestrictTo;
