//! # 타입 지정 모델 핸들
//!
//! [`DocumentStore`] 위에 엔티티 타입 `E`를 얹은 핸들입니다.
//! 숨김 필드 projection, 식별자 파싱, 저장 전 훅([`Entity::prepare_write`]) 실행,
//! BSON ↔ 엔티티 변환을 한곳에서 처리합니다.
//!
//! ```rust,ignore
//! let user = users
//!     .find(doc! { "email": email })
//!     .select(&["password"])
//!     .one()
//!     .await?;
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::{Entity, WriteKind};
use crate::repositories::store::{DocumentStore, FindOptions, Update};
use crate::services::auth::PasswordService;

/// 문자열 식별자를 ObjectId로 변환합니다.
pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::BadRequest(format!("Invalid _id: {}", id)))
}

/// 선택되지 않은 숨김 필드를 제외하는 projection
fn hidden_projection<E: Entity>(selected: &[String]) -> Option<Document> {
    let projection: Document = E::HIDDEN_FIELDS
        .iter()
        .filter(|field| !selected.iter().any(|s| s == *field))
        .map(|field| (field.to_string(), 0.into()))
        .collect();

    if projection.is_empty() { None } else { Some(projection) }
}

fn to_entity<E: Entity>(doc: Document) -> AppResult<E> {
    mongodb::bson::from_document(doc)
        .map_err(|e| AppError::DatabaseError(format!("{} 문서 변환 실패: {}", E::COLLECTION, e)))
}

/// 엔티티 `E`에 대한 모델 핸들
pub struct Model<E: Entity> {
    store: Arc<dyn DocumentStore>,
    passwords: PasswordService,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for Model<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            passwords: self.passwords.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Model<E> {
    pub fn new(store: Arc<dyn DocumentStore>, passwords: PasswordService) -> Self {
        Self {
            store,
            passwords,
            _entity: PhantomData,
        }
    }

    pub fn passwords(&self) -> &PasswordService {
        &self.passwords
    }

    /// 필터에 맞는 문서를 찾는 쿼리
    pub fn find(&self, filter: Document) -> Query<E> {
        Query::new(Arc::clone(&self.store), filter)
    }

    /// 식별자로 한 문서를 찾는 쿼리
    ///
    /// # Errors
    ///
    /// * `AppError::BadRequest` - ObjectId 형식이 아닌 식별자
    pub fn find_by_id(&self, id: &str) -> AppResult<Query<E>> {
        let object_id = parse_object_id(id)?;
        Ok(self.find(doc! { "_id": object_id }))
    }

    /// 검증과 저장 전 훅을 거쳐 새 문서를 저장합니다.
    pub async fn create(&self, mut doc: Document) -> AppResult<E> {
        E::prepare_write(&mut doc, WriteKind::Create, &self.passwords)?;

        let id = self.store.insert_one(doc.clone()).await?;
        doc.insert("_id", id);

        log::debug!("{} 문서 생성: {}", E::COLLECTION, id);
        to_entity(doc)
    }

    /// 검증과 저장 전 훅을 거쳐 문서를 갱신하고 갱신 후 문서를 돌려줍니다.
    ///
    /// `select`에 지정한 숨김 필드는 결과에 포함됩니다.
    pub async fn find_by_id_and_update<S: AsRef<str>>(
        &self,
        id: &str,
        set: Document,
        select: &[S],
    ) -> AppResult<Option<E>> {
        let object_id = parse_object_id(id)?;
        self.update_by_id(object_id, Update::set(set), select).await
    }

    /// [`Model::find_by_id_and_update`]와 같되 `$unset`도 함께 적용합니다.
    pub async fn update_by_id<S: AsRef<str>>(
        &self,
        id: ObjectId,
        mut update: Update,
        select: &[S],
    ) -> AppResult<Option<E>> {
        E::prepare_write(&mut update.set, WriteKind::Update, &self.passwords)?;

        let selected: Vec<String> = select.iter().map(|s| s.as_ref().to_string()).collect();
        let doc = self
            .store
            .find_one_and_update(doc! { "_id": id }, update, hidden_projection::<E>(&selected))
            .await?;

        doc.map(to_entity).transpose()
    }

    /// 모델 검증 없이 지정한 필드만 갱신합니다.
    ///
    /// 재설정 토큰 기록/정리, 활성 상태 전환처럼 일부 필드만 바꾸는 내부 연산용입니다.
    pub async fn update_without_validation(&self, id: ObjectId, update: Update) -> AppResult<Option<E>> {
        let doc = self
            .store
            .find_one_and_update(doc! { "_id": id }, update, hidden_projection::<E>(&[]))
            .await?;

        doc.map(to_entity).transpose()
    }

    pub async fn find_by_id_and_delete(&self, id: &str) -> AppResult<Option<E>> {
        let object_id = parse_object_id(id)?;

        let doc = self.store.find_one_and_delete(doc! { "_id": object_id }).await?;

        doc.map(to_entity).transpose()
    }
}

/// 체이닝 방식으로 조립하는 조회 쿼리
pub struct Query<E: Entity> {
    store: Arc<dyn DocumentStore>,
    filter: Document,
    selected: Vec<String>,
    sort: Option<Document>,
    skip: Option<u64>,
    limit: Option<i64>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Query<E> {
    fn new(store: Arc<dyn DocumentStore>, filter: Document) -> Self {
        Self {
            store,
            filter,
            selected: Vec::new(),
            sort: None,
            skip: None,
            limit: None,
            _entity: PhantomData,
        }
    }

    /// 필터 조건을 덧붙입니다. 같은 키는 새 조건으로 덮어씁니다.
    pub fn and_filter(mut self, filter: Document) -> Self {
        self.filter.extend(filter);
        self
    }

    /// 숨김 필드를 결과에 포함시킵니다.
    pub fn select<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        for field in fields {
            let field = field.as_ref();
            if !self.selected.iter().any(|s| s == field) {
                self.selected.push(field.to_string());
            }
        }
        self
    }

    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter(&self) -> &Document {
        &self.filter
    }

    pub async fn all(self) -> AppResult<Vec<E>> {
        let docs = self
            .store
            .find(FindOptions {
                projection: hidden_projection::<E>(&self.selected),
                filter: self.filter,
                sort: self.sort,
                skip: self.skip,
                limit: self.limit,
            })
            .await?;

        docs.into_iter().map(to_entity).collect()
    }

    pub async fn one(self) -> AppResult<Option<E>> {
        let doc = self
            .store
            .find_one(self.filter, hidden_projection::<E>(&self.selected))
            .await?;

        doc.map(to_entity).transpose()
    }
}
