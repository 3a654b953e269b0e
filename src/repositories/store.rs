//! # 문서 저장소 추상화
//!
//! 하나의 컬렉션에 대한 BSON 문서 단위 연산을 정의합니다.
//! 운영 환경은 [`MongoStore`](super::mongo_store::MongoStore),
//! 테스트와 로컬 실행은 [`MemoryStore`](super::memory_store::MemoryStore)가 구현합니다.
//!
//! 단일 문서 갱신의 원자성은 구현체가 보장합니다.
//! 여러 문서에 걸친 조정은 하지 않습니다.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::core::errors::{AppError, AppResult};

/// 다중 문서 조회 조건
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub filter: Document,
    pub projection: Option<Document>,
    pub sort: Option<Document>,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

/// 단일 문서 갱신 내용
///
/// `set`은 `$set`, `unset`은 `$unset`으로 적용됩니다.
#[derive(Debug, Clone, Default)]
pub struct Update {
    pub set: Document,
    pub unset: Vec<String>,
}

impl Update {
    pub fn set(set: Document) -> Self {
        Self { set, unset: Vec::new() }
    }

    pub fn unset(mut self, field: &str) -> Self {
        self.unset.push(field.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.unset.is_empty()
    }

    /// MongoDB 갱신 문서로 변환합니다.
    pub fn to_document(&self) -> Document {
        let mut update = Document::new();

        if !self.set.is_empty() {
            update.insert("$set", self.set.clone());
        }
        if !self.unset.is_empty() {
            let unset: Document = self.unset.iter().map(|field| (field.clone(), "".into())).collect();
            update.insert("$unset", unset);
        }

        update
    }
}

/// 컬렉션 하나에 대한 비동기 문서 저장소
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, options: FindOptions) -> AppResult<Vec<Document>>;

    async fn find_one(&self, filter: Document, projection: Option<Document>) -> AppResult<Option<Document>>;

    /// 문서를 삽입하고 부여된 `_id`를 돌려줍니다.
    async fn insert_one(&self, doc: Document) -> AppResult<ObjectId>;

    /// 조건에 맞는 첫 문서를 갱신하고 갱신 후 문서를 돌려줍니다.
    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Update,
        projection: Option<Document>,
    ) -> AppResult<Option<Document>>;

    async fn find_one_and_delete(&self, filter: Document) -> AppResult<Option<Document>>;
}

/// 유니크 인덱스 위반 에러
pub fn duplicate_value_error(field: &str, value: &str) -> AppError {
    AppError::BadRequest(format!(
        "Duplicate field value for {}: \"{}\". Please use another value!",
        field, value
    ))
}
