//! # HTTP Request Handlers Module
//!
//! 핸들러는 모두 "핸들러를 만드는 함수" 형태입니다.
//! 모델 핸들과 연산별 설정을 받아 actix-web이 바로 등록할 수 있는 클로저를 돌려줍니다.
//!
//! ```text
//! routes ──(Model<E>, Schema, 옵션)──▶ handlers::* ──▶ impl Fn(..) -> HandlerFuture
//! ```
//!
//! - [`factory`] - 엔티티 공통 CRUD (getAll, getOne, createOne, updateOne, deleteOne)
//! - [`auth`] - 회원가입, 로그인, 비밀번호 변경/재설정
//! - [`users`] - 사용자 정보 수정, 본인 계정 비활성화
//!
//! 모든 핸들러는 `AppResult<HttpResponse>`를 반환하고, 실패는
//! [`AppError`](crate::core::errors::AppError)의 `ResponseError` 구현에서 응답으로 바뀝니다.

pub mod factory;
pub mod auth;
pub mod users;
