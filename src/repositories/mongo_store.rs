//! MongoDB 컬렉션 기반 [`DocumentStore`] 구현

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{oid::ObjectId, Document};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::core::errors::{AppError, AppResult};
use crate::repositories::store::{duplicate_value_error, DocumentStore, FindOptions, Update};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB 문서 저장소
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    pub fn new(database: &mongodb::Database, collection_name: &str) -> Self {
        Self {
            collection: database.collection::<Document>(collection_name),
        }
    }

    /// 유니크 필드마다 `<필드>_unique` 인덱스를 생성합니다.
    ///
    /// 이미 같은 정의의 인덱스가 있으면 MongoDB가 그대로 유지합니다.
    pub async fn ensure_unique_indexes(&self, fields: &[&str]) -> AppResult<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let indexes: Vec<IndexModel> = fields
            .iter()
            .map(|field| {
                let mut keys = Document::new();
                keys.insert(*field, 1);

                IndexModel::builder()
                    .keys(keys)
                    .options(
                        IndexOptions::builder()
                            .unique(true)
                            .name(format!("{}_unique", field))
                            .build(),
                    )
                    .build()
            })
            .collect();

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        log::info!("인덱스 확인 완료: {} {:?}", self.collection.name(), fields);
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, options: FindOptions) -> AppResult<Vec<Document>> {
        let mut action = self.collection.find(options.filter);

        if let Some(projection) = options.projection {
            action = action.projection(projection);
        }
        if let Some(sort) = options.sort {
            action = action.sort(sort);
        }
        if let Some(skip) = options.skip {
            action = action.skip(skip);
        }
        if let Some(limit) = options.limit {
            action = action.limit(limit);
        }

        let cursor = action.await.map_err(map_mongo_error)?;

        cursor.try_collect().await.map_err(map_mongo_error)
    }

    async fn find_one(&self, filter: Document, projection: Option<Document>) -> AppResult<Option<Document>> {
        let mut action = self.collection.find_one(filter);

        if let Some(projection) = projection {
            action = action.projection(projection);
        }

        action.await.map_err(map_mongo_error)
    }

    async fn insert_one(&self, doc: Document) -> AppResult<ObjectId> {
        let result = self.collection.insert_one(doc).await.map_err(map_mongo_error)?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("삽입된 문서의 _id가 ObjectId가 아닙니다".to_string()))
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Update,
        projection: Option<Document>,
    ) -> AppResult<Option<Document>> {
        if update.is_empty() {
            return self.find_one(filter, projection).await;
        }

        let mut action = self
            .collection
            .find_one_and_update(filter, update.to_document())
            .return_document(ReturnDocument::After);

        if let Some(projection) = projection {
            action = action.projection(projection);
        }

        action.await.map_err(map_mongo_error)
    }

    async fn find_one_and_delete(&self, filter: Document) -> AppResult<Option<Document>> {
        self.collection
            .find_one_and_delete(filter)
            .await
            .map_err(map_mongo_error)
    }
}

/// 드라이버 에러를 애플리케이션 에러로 변환합니다.
///
/// 중복 키(11000)는 클라이언트 입력 문제이므로 `BadRequest`가 됩니다.
fn map_mongo_error(error: MongoError) -> AppError {
    let duplicate_message = match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE => {
            Some(write_error.message.clone())
        }
        ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
            Some(command_error.message.clone())
        }
        _ => None,
    };

    match duplicate_message {
        Some(message) => {
            let (field, value) = parse_duplicate_key(&message);
            duplicate_value_error(&field, &value)
        }
        None => AppError::DatabaseError(error.to_string()),
    }
}

/// `E11000 ... index: email_unique dup key: { email: "a@x.com" }` 형식에서
/// 필드 이름과 값을 꺼냅니다.
fn parse_duplicate_key(message: &str) -> (String, String) {
    let field = message
        .split("index: ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .map(|index| index.trim_end_matches("_unique").to_string())
        .unwrap_or_else(|| "field".to_string());

    let value = message
        .split("dup key:")
        .nth(1)
        .and_then(|rest| rest.split('"').nth(1))
        .unwrap_or_default()
        .to_string();

    (field, value)
}
