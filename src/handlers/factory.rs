//! # 범용 핸들러 팩토리
//!
//! 모델 핸들과 연산별 설정(필드 화이트리스트, 검증 스키마, 옵션)을 받아
//! actix-web 핸들러 클로저를 만들어 냅니다.
//!
//! 쓰기 연산은 모두 같은 파이프라인을 따릅니다.
//!
//! ```text
//! 빈 본문 검사 → filter_obj → 남은 필드 검사 → Schema::validate
//!   → Model 연산 (prepare_write 포함) → 응답 형태 결정
//! ```
//!
//! ```rust,ignore
//! cfg.route("", web::get().to(factory::get_all(ctx.challenges.clone())));
//! cfg.route("/{id}", web::delete().to(factory::delete_one(ctx.challenges.clone())));
//! ```

use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::future::LocalBoxFuture;
use mongodb::bson::{doc, Document};
use serde_json::{json, Map, Value};

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::RequestBody;
use crate::domain::entities::Entity;
use crate::repositories::model::Model;
use crate::utils::api_features::ApiFeatures;
use crate::utils::filter::filter_obj;
use crate::utils::response::{project_fields, send_json_res};
use crate::utils::validation::Schema;

/// 팩토리가 만드는 핸들러의 반환 타입
pub type HandlerFuture = LocalBoxFuture<'static, AppResult<HttpResponse>>;

const EMPTY_BODY: &str = "Request body is empty. Please include data in the request";
const EMPTY_UPDATE_BODY: &str =
    "Request body is empty. Please include data in the request body to successfully update.";
const NO_VALID_FIELDS: &str =
    "No valid properties received in the request body, please submit a valid property!";
const MISSING_DOC: &str = "No resource found with that ID!";

/// `updateOne` 에러 메시지 재정의
#[derive(Debug, Clone, Default)]
pub struct ErrorMessages {
    pub empty_body: Option<&'static str>,
    pub no_valid_fields: Option<&'static str>,
    pub missing_doc: Option<&'static str>,
}

/// `updateOne` 옵션
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// 스키마의 모든 필드를 선택 항목으로 검증
    pub partial: bool,
    /// 갱신 후 문서에 포함시킬 숨김 필드
    pub select_hidden: &'static [&'static str],
    pub messages: ErrorMessages,
    /// 응답에 남길 필드. 비어 있으면 문서 전체를 응답합니다.
    pub response_fields: &'static [&'static str],
}

/// 요청 경로의 `{id}` 세그먼트
pub(crate) fn path_id(req: &HttpRequest) -> String {
    req.match_info().query("id").to_string()
}

/// 쿼리 문자열을 키-값 맵으로 해석합니다.
pub(crate) fn query_map(req: &HttpRequest) -> AppResult<HashMap<String, String>> {
    web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .map_err(|e| AppError::BadRequest(format!("Invalid query string: {}", e)))
}

/// 검증을 통과한 JSON 필드를 BSON 문서로 변환합니다.
pub(crate) fn to_bson_document(map: &Map<String, Value>) -> AppResult<Document> {
    mongodb::bson::to_document(map)
        .map_err(|e| AppError::BadRequest(format!("Request body cannot be stored: {}", e)))
}

/// 목록 조회
///
/// 쿼리 문자열의 필터/정렬/필드 제한/페이지네이션을 반영합니다.
/// 결과가 비어 있으면 404입니다.
pub fn get_all<E: Entity>(model: Model<E>) -> impl Fn(HttpRequest) -> HandlerFuture + Clone + 'static {
    move |req: HttpRequest| -> HandlerFuture {
        let model = model.clone();

        Box::pin(async move {
            let query_string = query_map(&req)?;

            let docs = ApiFeatures::new(model.find(doc! {}), query_string)
                .filter()?
                .sort()
                .limit_fields()
                .paginate()?
                .execute()
                .await?;

            if docs.is_empty() {
                return Err(AppError::NotFound(
                    "Search query returned no results! Please check your search query!".to_string(),
                ));
            }

            Ok(send_json_res(StatusCode::OK, json!({ "results": docs.len(), "data": docs })))
        })
    }
}

/// 단건 조회
///
/// `hidden_fields`에 지정한 숨김 필드를 함께 읽어 응답합니다.
pub fn get_one<E: Entity>(
    model: Model<E>,
    hidden_fields: &'static [&'static str],
) -> impl Fn(HttpRequest) -> HandlerFuture + Clone + 'static {
    move |req: HttpRequest| -> HandlerFuture {
        let model = model.clone();

        Box::pin(async move {
            let query_string = query_map(&req)?;
            let query = model.find_by_id(&path_id(&req))?;

            let doc = ApiFeatures::new(query, query_string)
                .select_fields(hidden_fields)
                .limit_fields()
                .execute_one()
                .await?
                .ok_or_else(|| AppError::NotFound(MISSING_DOC.to_string()))?;

            Ok(send_json_res(StatusCode::OK, json!({ "data": doc })))
        })
    }
}

/// 생성
///
/// 본문을 `allowed_fields`로 거른 뒤 `schema` 전체 검증을 통과해야 저장됩니다.
pub fn create_one<E: Entity>(
    model: Model<E>,
    schema: Schema,
    allowed_fields: &'static [&'static str],
) -> impl Fn(RequestBody) -> HandlerFuture + Clone + 'static {
    move |body: RequestBody| -> HandlerFuture {
        let model = model.clone();
        let schema = schema.clone();

        Box::pin(async move {
            if body.is_empty() {
                return Err(AppError::BadRequest(EMPTY_BODY.to_string()));
            }

            let filtered = filter_obj(allowed_fields, body.as_map());
            if filtered.is_empty() {
                return Err(AppError::BadRequest(NO_VALID_FIELDS.to_string()));
            }

            schema.validate(&filtered, false)?;

            let created = model.create(to_bson_document(&filtered)?).await?;

            Ok(send_json_res(
                StatusCode::CREATED,
                json!({ "data": { "doc": created.to_public() } }),
            ))
        })
    }
}

/// 갱신
///
/// 본문은 `schema`의 키로 걸러지고, 갱신은 식별자 기준 단일 원자 연산으로 수행됩니다.
pub fn update_one<E: Entity>(
    model: Model<E>,
    schema: Schema,
    options: UpdateOptions,
) -> impl Fn(HttpRequest, RequestBody) -> HandlerFuture + Clone + 'static {
    move |req: HttpRequest, body: RequestBody| -> HandlerFuture {
        let model = model.clone();
        let schema = schema.clone();
        let options = options.clone();

        Box::pin(async move {
            let messages = &options.messages;

            if body.is_empty() {
                return Err(AppError::BadRequest(
                    messages.empty_body.unwrap_or(EMPTY_UPDATE_BODY).to_string(),
                ));
            }

            let filtered = filter_obj(&schema.keys(), body.as_map());
            if filtered.is_empty() {
                return Err(AppError::BadRequest(
                    messages.no_valid_fields.unwrap_or(NO_VALID_FIELDS).to_string(),
                ));
            }

            schema.validate(&filtered, options.partial)?;

            let updated = model
                .find_by_id_and_update(&path_id(&req), to_bson_document(&filtered)?, options.select_hidden)
                .await?
                .ok_or_else(|| AppError::NotFound(messages.missing_doc.unwrap_or(MISSING_DOC).to_string()))?;

            let data = if options.response_fields.is_empty() {
                updated.to_public()
            } else {
                project_fields(updated.to_public(), options.response_fields)
            };

            Ok(send_json_res(StatusCode::OK, json!({ "data": data })))
        })
    }
}

/// 삭제
///
/// 같은 식별자로 두 번 호출하면 두 번째는 404입니다.
pub fn delete_one<E: Entity>(model: Model<E>) -> impl Fn(HttpRequest) -> HandlerFuture + Clone + 'static {
    move |req: HttpRequest| -> HandlerFuture {
        let model = model.clone();

        Box::pin(async move {
            model
                .find_by_id_and_delete(&path_id(&req))
                .await?
                .ok_or_else(|| AppError::NotFound(MISSING_DOC.to_string()))?;

            Ok(HttpResponse::NoContent().finish())
        })
    }
}
