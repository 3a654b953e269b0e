//! # Domain Entities Module
//!
//! MongoDB 컬렉션과 1:1로 대응되는 도메인 엔티티들과,
//! 범용 핸들러 팩토리가 엔티티를 다루기 위해 요구하는 [`Entity`] trait을 정의합니다.
//!
//! ## 숨김 필드
//!
//! `HIDDEN_FIELDS`에 선언된 필드는 조회 시 기본적으로 projection에서 제외됩니다.
//! 호출자가 `select`로 명시적으로 요청한 경우에만 함께 읽힙니다.
//!
//! ## 쓰기 훅
//!
//! [`Entity::prepare_write`]는 저장 직전에 한 번 호출되며
//! 모델 수준 검증과 저장 전 변환(비밀번호 해싱, 기본값 채우기)을 담당합니다.
//!
//! ```text
//! 요청 본문 → filter_obj → Schema::validate → Entity::prepare_write → DocumentStore
//! ```

pub mod users;
pub mod challenges;

use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::core::errors::AppResult;
use crate::services::auth::PasswordService;
use crate::utils::validation::FieldType;

/// 쓰기 연산 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// 새 문서 삽입
    Create,
    /// 기존 문서의 일부 필드 갱신 (`$set`)
    Update,
}

/// 범용 모델 핸들이 다룰 수 있는 엔티티
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// 컬렉션 이름
    const COLLECTION: &'static str;

    /// 기본 조회에서 제외되는 필드
    const HIDDEN_FIELDS: &'static [&'static str];

    /// 유니크 인덱스를 가지는 필드
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> Option<ObjectId>;

    /// 외부로 내보내는 JSON 표현
    fn to_public(&self) -> Value;

    /// 쿼리 문자열 값 캐스팅에 사용하는 필드 타입
    fn field_type(field: &str) -> Option<FieldType>;

    /// 저장 직전 검증 및 변환
    fn prepare_write(doc: &mut Document, kind: WriteKind, passwords: &PasswordService) -> AppResult<()>;
}

/// 필수 필드 검사
///
/// 생성 시에는 누락, `null`, 빈 문자열을 모두 거부하고
/// 갱신 시에는 값이 주어진 필드가 `null`이나 빈 문자열로 바뀌는 것만 거부합니다.
pub(crate) fn required_field_messages(
    doc: &Document,
    required: &[(&str, &str)],
    kind: WriteKind,
) -> Vec<String> {
    required
        .iter()
        .filter(|(field, _)| match (doc.get(*field), kind) {
            (None, WriteKind::Create) => true,
            (None, WriteKind::Update) => false,
            (Some(Bson::Null), _) => true,
            (Some(Bson::String(text)), _) => text.trim().is_empty(),
            (Some(_), _) => false,
        })
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect()
}
