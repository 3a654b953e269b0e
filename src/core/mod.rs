//! # Core Module
//!
//! - [`errors`] - 전역 에러 타입 [`AppError`]와 HTTP 응답 변환
//! - [`context`] - 시작 시 조립되는 공유 상태 [`AppContext`]
//!
//! ```rust,ignore
//! let context = AppContext::with_mongo(&database, &config).await?;
//!
//! HttpServer::new(move || {
//!     App::new().configure(|cfg| configure_all_routes(cfg, &context))
//! })
//! ```

pub mod errors;
pub mod context;

pub use errors::{AppError, AppResult};
pub use context::AppContext;
