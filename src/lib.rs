//! 챌린지 API 백엔드
//!
//! 코딩 챌린지를 제공하는 REST API 서비스입니다.
//! JWT 세션 토큰 인증, 역할 기반 접근 제어, 비밀번호 재설정 메일,
//! 그리고 설정으로 조립되는 범용 CRUD 핸들러를 제공합니다.
//!
//! # Features
//!
//! - **사용자 관리**: 가입, 로그인, 본인 정보 수정, 소프트 삭제
//! - **JWT 인증**: 비밀번호 변경 이전에 발급된 토큰 무효화
//! - **비밀번호 재설정**: 해시로만 저장되는 일회용 토큰과 메일 발송
//! - **챌린지**: 관리자 CRUD, 풀이 제출 시 정답 공개
//! - **쿼리 기능**: 필터링, 정렬, 필드 제한, 페이지네이션
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + Protect/RestrictTo
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 팩토리가 만든 요청/응답 처리 클로저
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Model<Entity>  │ ← 숨김 필드, 쓰기 훅
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  DocumentStore  │ ← MongoDB 또는 메모리 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use challenge_api_backend::core::AppContext;
//! use challenge_api_backend::routes::{configure_all_routes, not_found};
//!
//! let ctx = AppContext::with_mongo(&database, &config).await?;
//! let app = App::new()
//!     .configure(|cfg| configure_all_routes(cfg, &ctx))
//!     .default_service(web::to(not_found));
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
