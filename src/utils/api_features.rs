//! # 쿼리 문자열 기반 조회 조립기
//!
//! 목록/단건 조회 핸들러가 쿼리 문자열을 [`Query`]에 반영할 때 사용합니다.
//!
//! | 쿼리 문자열 | 반영 결과 |
//! |-------------|-----------|
//! | `difficulty=easy` | `{difficulty: "easy"}` |
//! | `points[gte]=10` | `{points: {$gte: 10}}` |
//! | `sort=-difficulty,category` | `{difficulty: -1, category: 1}` |
//! | `fields=category,challengeTask` | 응답 필드 제한 (`id`는 항상 포함) |
//! | `page=2&limit=10` | `skip 10, limit 10` |
//!
//! 숨김 필드는 필터, 필드 제한 어디에서도 사용할 수 없습니다.

use std::collections::HashMap;

use mongodb::bson::{Bson, Document};
use serde_json::Value;

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::Entity;
use crate::repositories::model::Query;
use crate::utils::response::project_fields;
use crate::utils::validation::FieldType;

/// 필터에서 제외되는 예약 키
const RESERVED_KEYS: &[&str] = &["page", "sort", "limit", "fields"];

/// 지원하는 비교 연산자
const COMPARISON_OPERATORS: &[&str] = &["gte", "gt", "lte", "lt"];

const DEFAULT_PAGE_LIMIT: u64 = 100;

/// 쿼리 문자열로 [`Query`]를 꾸미는 빌더
pub struct ApiFeatures<E: Entity> {
    query: Query<E>,
    query_string: HashMap<String, String>,
    fields: Option<Vec<String>>,
}

impl<E: Entity> ApiFeatures<E> {
    pub fn new(query: Query<E>, query_string: HashMap<String, String>) -> Self {
        Self {
            query,
            query_string,
            fields: None,
        }
    }

    /// 예약 키를 뺀 나머지를 필터로 반영합니다.
    ///
    /// `field[op]` 형태의 키는 `{field: {$op: value}}`가 되고,
    /// 값은 엔티티가 선언한 필드 타입으로 변환됩니다.
    pub fn filter(mut self) -> AppResult<Self> {
        let mut filter = Document::new();

        for (key, raw) in &self.query_string {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }

            let (field, operator) = split_operator(key);
            if E::HIDDEN_FIELDS.contains(&field) {
                continue;
            }

            let value = cast_value(raw, E::field_type(field));

            match operator {
                Some(operator) => {
                    let entry = filter
                        .entry(field.to_string())
                        .or_insert_with(|| Bson::Document(Document::new()));

                    match entry {
                        Bson::Document(operators) => {
                            operators.insert(format!("${}", operator), value);
                        }
                        _ => {
                            return Err(AppError::BadRequest(format!(
                                "Cannot combine equality and comparison on field: {}",
                                field
                            )));
                        }
                    }
                }
                None => {
                    if filter.contains_key(field) {
                        return Err(AppError::BadRequest(format!(
                            "Cannot combine equality and comparison on field: {}",
                            field
                        )));
                    }
                    filter.insert(field.to_string(), value);
                }
            }
        }

        self.query = self.query.and_filter(filter);
        Ok(self)
    }

    /// `sort=-a,b` → `{a: -1, b: 1}`
    pub fn sort(mut self) -> Self {
        if let Some(raw) = self.query_string.get("sort") {
            let sort: Document = raw
                .split(',')
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .map(|field| match field.strip_prefix('-') {
                    Some(name) => (name.to_string(), Bson::Int32(-1)),
                    None => (field.to_string(), Bson::Int32(1)),
                })
                .filter(|(name, _)| !E::HIDDEN_FIELDS.contains(&name.as_str()))
                .collect();

            if !sort.is_empty() {
                self.query = self.query.sort(sort);
            }
        }
        self
    }

    /// `fields=a,b`로 응답 필드를 제한합니다.
    pub fn limit_fields(mut self) -> Self {
        if let Some(raw) = self.query_string.get("fields") {
            let fields: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|field| !field.is_empty() && !E::HIDDEN_FIELDS.contains(field))
                .map(str::to_string)
                .collect();

            self.fields = Some(fields);
        }
        self
    }

    /// `page`, `limit`이 있을 때만 페이지네이션을 적용합니다.
    pub fn paginate(mut self) -> AppResult<Self> {
        let page = self.query_string.get("page");
        let limit = self.query_string.get("limit");

        if page.is_none() && limit.is_none() {
            return Ok(self);
        }

        let page = page.map(|raw| parse_positive("page", raw)).transpose()?.unwrap_or(1);
        let limit = limit
            .map(|raw| parse_positive("limit", raw))
            .transpose()?
            .unwrap_or(DEFAULT_PAGE_LIMIT);

        let skip = (page - 1).saturating_mul(limit);
        let limit = i64::try_from(limit).map_err(|_| invalid_pagination("limit", &limit.to_string()))?;

        self.query = self.query.skip(skip).limit(limit);
        Ok(self)
    }

    /// 숨김 필드를 결과에 포함시킵니다.
    pub fn select_fields<S: AsRef<str>>(mut self, hidden_fields: &[S]) -> Self {
        self.query = self.query.select(hidden_fields);
        self
    }

    /// 쿼리를 실행해 공개 표현 목록을 돌려줍니다.
    pub async fn execute(self) -> AppResult<Vec<Value>> {
        let fields = self.fields;
        let docs = self.query.all().await?;

        Ok(docs.iter().map(|doc| shape(doc.to_public(), fields.as_deref())).collect())
    }

    /// 단건 쿼리를 실행합니다.
    pub async fn execute_one(self) -> AppResult<Option<Value>> {
        let fields = self.fields;
        let doc = self.query.one().await?;

        Ok(doc.map(|doc| shape(doc.to_public(), fields.as_deref())))
    }
}

fn shape(value: Value, fields: Option<&[String]>) -> Value {
    match fields {
        Some(fields) if !fields.is_empty() => project_fields(value, fields),
        _ => value,
    }
}

/// `points[gte]` → (`points`, `Some("gte")`)
fn split_operator(key: &str) -> (&str, Option<&str>) {
    if let Some((field, rest)) = key.split_once('[') {
        if let Some(operator) = rest.strip_suffix(']') {
            if COMPARISON_OPERATORS.contains(&operator) {
                return (field, Some(operator));
            }
        }
    }
    (key, None)
}

fn cast_value(raw: &str, kind: Option<FieldType>) -> Bson {
    match kind {
        Some(FieldType::Boolean) => match raw {
            "true" => Bson::Boolean(true),
            "false" => Bson::Boolean(false),
            _ => Bson::String(raw.to_string()),
        },
        Some(FieldType::Number) => raw
            .parse::<i64>()
            .map(Bson::Int64)
            .or_else(|_| raw.parse::<f64>().map(Bson::Double))
            .unwrap_or_else(|_| Bson::String(raw.to_string())),
        _ => Bson::String(raw.to_string()),
    }
}

fn parse_positive(name: &str, raw: &str) -> AppResult<u64> {
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(invalid_pagination(name, raw)),
    }
}

fn invalid_pagination(name: &str, raw: &str) -> AppError {
    AppError::BadRequest(format!("Invalid {} value: {}. Please use a positive integer!", name, raw))
}
