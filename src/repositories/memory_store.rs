//! 프로세스 내부 메모리 기반 [`DocumentStore`] 구현
//!
//! 통합 테스트와 데이터베이스 없는 로컬 실행에 사용합니다.
//! MongoDB 질의 언어 중 이 API가 실제로 만드는 부분만 해석합니다.
//!
//! - 필터: 동등 비교, `$gt`/`$gte`/`$lt`/`$lte`/`$ne`
//! - projection: 포함형(`{a: 1}`) 또는 제외형(`{a: 0}`)
//! - 정렬, skip, limit, 유니크 필드

use std::cmp::Ordering;
use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use crate::core::errors::{AppError, AppResult};
use crate::repositories::store::{duplicate_value_error, DocumentStore, FindOptions, Update};

/// 메모리 문서 저장소
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<Vec<Document>>,
    unique_fields: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unique_fields(fields: &[&str]) -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
            unique_fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.docs.read().map(|docs| docs.len()).unwrap_or(0)
    }

    fn check_unique(&self, docs: &[Document], candidate: &Document, skip_index: Option<usize>) -> AppResult<()> {
        for field in &self.unique_fields {
            let Some(value) = candidate.get(field) else { continue };

            let taken = docs
                .iter()
                .enumerate()
                .filter(|(index, _)| Some(*index) != skip_index)
                .any(|(_, other)| {
                    other
                        .get(field)
                        .is_some_and(|existing| compare_bson(existing, value) == Some(Ordering::Equal))
                });

            if taken {
                let shown = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
                return Err(duplicate_value_error(field, &shown));
            }
        }

        Ok(())
    }
}

fn lock_error<T>(_: T) -> AppError {
    AppError::DatabaseError("메모리 저장소 잠금 획득 실패".to_string())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, options: FindOptions) -> AppResult<Vec<Document>> {
        let docs = self.docs.read().map_err(lock_error)?;

        let mut matched: Vec<Document> = docs
            .iter()
            .filter(|doc| matches_filter(doc, &options.filter))
            .cloned()
            .collect();

        if let Some(sort) = &options.sort {
            matched.sort_by(|a, b| compare_by_sort(a, b, sort));
        }

        let skip = options.skip.unwrap_or(0) as usize;
        let limit = match options.limit {
            Some(limit) if limit > 0 => limit as usize,
            _ => usize::MAX,
        };

        Ok(matched
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|doc| apply_projection(doc, options.projection.as_ref()))
            .collect())
    }

    async fn find_one(&self, filter: Document, projection: Option<Document>) -> AppResult<Option<Document>> {
        let docs = self.docs.read().map_err(lock_error)?;

        Ok(docs
            .iter()
            .find(|doc| matches_filter(doc, &filter))
            .cloned()
            .map(|doc| apply_projection(doc, projection.as_ref())))
    }

    async fn insert_one(&self, mut doc: Document) -> AppResult<ObjectId> {
        let id = match doc.get_object_id("_id") {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                doc.insert("_id", id);
                id
            }
        };

        let mut docs = self.docs.write().map_err(lock_error)?;
        self.check_unique(&docs, &doc, None)?;
        docs.push(doc);

        Ok(id)
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Update,
        projection: Option<Document>,
    ) -> AppResult<Option<Document>> {
        let mut docs = self.docs.write().map_err(lock_error)?;

        let Some(index) = docs.iter().position(|doc| matches_filter(doc, &filter)) else {
            return Ok(None);
        };

        let mut updated = docs[index].clone();
        for (key, value) in update.set {
            updated.insert(key, value);
        }
        for key in &update.unset {
            updated.remove(key);
        }

        self.check_unique(&docs, &updated, Some(index))?;
        docs[index] = updated.clone();

        Ok(Some(apply_projection(updated, projection.as_ref())))
    }

    async fn find_one_and_delete(&self, filter: Document) -> AppResult<Option<Document>> {
        let mut docs = self.docs.write().map_err(lock_error)?;

        Ok(docs
            .iter()
            .position(|doc| matches_filter(doc, &filter))
            .map(|index| docs.remove(index)))
    }
}

fn matches_filter(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(field, condition)| {
        let value = doc.get(field);

        match condition {
            Bson::Document(operators) if operators.keys().all(|k| k.starts_with('$')) => operators
                .iter()
                .all(|(operator, operand)| matches_operator(value, operator, operand)),
            expected => matches_equal(value, expected),
        }
    })
}

fn matches_equal(value: Option<&Bson>, expected: &Bson) -> bool {
    match (value, expected) {
        (None, Bson::Null) | (Some(Bson::Null), Bson::Null) => true,
        (Some(value), expected) => compare_bson(value, expected) == Some(Ordering::Equal),
        (None, _) => false,
    }
}

fn matches_operator(value: Option<&Bson>, operator: &str, operand: &Bson) -> bool {
    if operator == "$ne" {
        return !matches_equal(value, operand);
    }

    let Some(ordering) = value.and_then(|value| compare_bson(value, operand)) else {
        return false;
    };

    match operator {
        "$gt" => ordering == Ordering::Greater,
        "$gte" => ordering != Ordering::Less,
        "$lt" => ordering == Ordering::Less,
        "$lte" => ordering != Ordering::Greater,
        "$eq" => ordering == Ordering::Equal,
        _ => false,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

/// 같은 종류의 BSON 값끼리만 비교합니다. 숫자는 타입이 달라도 비교합니다.
fn compare_bson(a: &Bson, b: &Bson) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
        return x.partial_cmp(&y);
    }

    match (a, b) {
        (Bson::String(x), Bson::String(y)) => Some(x.cmp(y)),
        (Bson::Boolean(x), Bson::Boolean(y)) => Some(x.cmp(y)),
        (Bson::ObjectId(x), Bson::ObjectId(y)) => Some(x.cmp(y)),
        (Bson::DateTime(x), Bson::DateTime(y)) => Some(x.cmp(y)),
        (Bson::Null, Bson::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

fn compare_by_sort(a: &Document, b: &Document, sort: &Document) -> Ordering {
    for (field, direction) in sort {
        let ordering = match (a.get(field), b.get(field)) {
            (Some(x), Some(y)) => compare_bson(x, y).unwrap_or(Ordering::Equal),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };

        let ordering = if as_number(direction).is_some_and(|d| d < 0.0) {
            ordering.reverse()
        } else {
            ordering
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

fn is_truthy(value: &Bson) -> bool {
    match value {
        Bson::Boolean(flag) => *flag,
        other => as_number(other).is_some_and(|n| n != 0.0),
    }
}

fn apply_projection(doc: Document, projection: Option<&Document>) -> Document {
    let Some(projection) = projection.filter(|p| !p.is_empty()) else {
        return doc;
    };

    let inclusive = projection
        .iter()
        .any(|(field, value)| field != "_id" && is_truthy(value));

    if inclusive {
        let keep_id = projection.get("_id").is_none_or(is_truthy);

        doc.into_iter()
            .filter(|(field, _)| {
                (field == "_id" && keep_id) || projection.get(field).is_some_and(is_truthy)
            })
            .collect()
    } else {
        doc.into_iter()
            .filter(|(field, _)| !projection.get(field).is_some_and(|value| !is_truthy(value)))
            .collect()
    }
}
