//! # Domain Layer Module
//!
//! 도메인 타입을 모아 둔 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 컬렉션과 1:1로 대응되는 엔티티 (User, Challenge)
//! ├── dto       - 요청 스키마, 응답 표현
//! └── models    - 인증 주체, 토큰 같은 값 객체
//!      │
//!      ▼
//! Handlers / Middlewares
//!      │
//!      ▼
//! Repositories (Model<E> → DocumentStore)
//! ```
//!
//! 엔티티는 저장 형태(camelCase BSON)를 그대로 따르고,
//! 외부로 나가는 JSON은 항상 dto의 응답 타입을 거칩니다.

pub mod entities;
pub mod dto;
pub mod models;
