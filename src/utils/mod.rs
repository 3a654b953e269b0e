//! 공통 유틸리티 모듈
//!
//! # Modules
//!
//! - [`filter`] - 필드 화이트리스트 적용
//! - [`validation`] - 선언적 스키마 검증기
//! - [`api_features`] - 쿼리 문자열 기반 조회 조립
//! - [`response`] - 응답 엔벨로프와 응답 필드 제한
//! - [`string_utils`] - 요청 본문 문자열 필드 처리
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::filter::filter_obj;
//! use crate::utils::response::send_json_res;
//!
//! let filtered = filter_obj(&schema.keys(), body.as_map());
//! schema.validate(&filtered, true)?;
//!
//! Ok(send_json_res(StatusCode::OK, json!({ "data": doc })))
//! ```

pub mod filter;
pub mod validation;
pub mod api_features;
pub mod response;
pub mod string_utils;
