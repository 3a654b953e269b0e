//! # 사용자 관리 핸들러
//!
//! | 메서드 | 경로 | 설명 | 권한 |
//! |--------|------|------|------|
//! | `PATCH` | `/users/updateMe` | 본인 정보 수정 | 로그인 |
//! | `DELETE` | `/users/deleteMe` | 본인 계정 비활성화 | 로그인 |
//! | `PATCH` | `/users/{id}` | 사용자 정보 수정 | admin |
//!
//! 비밀번호는 두 수정 경로 모두에서 바꿀 수 없습니다.
//! `/users/updateMyPassword`만 비밀번호를 변경합니다.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use mongodb::bson::doc;
use serde_json::json;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::RequestBody;
use crate::domain::entities::users::user::User;
use crate::domain::entities::Entity;
use crate::domain::models::auth::CurrentUser;
use crate::handlers::factory::{path_id, to_bson_document, HandlerFuture};
use crate::repositories::model::{parse_object_id, Model};
use crate::repositories::store::Update;
use crate::utils::filter::filter_obj;
use crate::utils::response::send_json_res;
use crate::utils::string_utils::body_str;
use crate::utils::validation::Schema;

/// 수정 결과에 포함되는 숨김 필드
const UPDATE_SELECT: &[&str] = &["role"];

/// 두 수정 경로가 공유하는 단계
///
/// 비밀번호 변경 거부 → 화이트리스트 → 남은 필드 확인 → 부분 검증 → 갱신
async fn apply_user_update(model: &Model<User>, schema: &Schema, id: &str, body: &RequestBody) -> AppResult<HttpResponse> {
    if body.contains_key("password") {
        return Err(AppError::BadRequest(
            "Cannot update password through this route. Please use /updateMyPassword instead.".to_string(),
        ));
    }

    let keys = schema.keys();
    let filtered = filter_obj(&keys, body.as_map());
    if filtered.is_empty() {
        return Err(AppError::BadRequest(format!(
            "No valid fields received in the request body, please submit a valid field. Valid fields include {}.",
            keys.join(", ")
        )));
    }

    schema.validate(&filtered, true)?;

    let user = model
        .find_by_id_and_update(id, to_bson_document(&filtered)?, UPDATE_SELECT)
        .await?
        .ok_or_else(|| AppError::NotFound("No user found with that ID!".to_string()))?;

    Ok(send_json_res(StatusCode::OK, json!({ "data": { "user": user.to_public() } })))
}

/// 관리자용 사용자 수정 (`/users/{id}`)
pub fn update_user(model: Model<User>, schema: Schema) -> impl Fn(HttpRequest, RequestBody) -> HandlerFuture + Clone + 'static {
    move |req: HttpRequest, body: RequestBody| -> HandlerFuture {
        let model = model.clone();
        let schema = schema.clone();

        Box::pin(async move { apply_user_update(&model, &schema, &path_id(&req), &body).await })
    }
}

/// 본인 정보 수정
pub fn update_me(model: Model<User>, schema: Schema) -> impl Fn(CurrentUser, RequestBody) -> HandlerFuture + Clone + 'static {
    move |current: CurrentUser, body: RequestBody| -> HandlerFuture {
        let model = model.clone();
        let schema = schema.clone();

        Box::pin(async move {
            if body.is_empty() {
                return Err(AppError::BadRequest(
                    "Request body is empty. Please include data in the request body to successfully update."
                        .to_string(),
                ));
            }

            apply_user_update(&model, &schema, &current.id(), &body).await
        })
    }
}

/// 본인 계정 비활성화 (soft delete)
///
/// 비밀번호를 확인한 뒤 `isActive=false`로 바꿉니다. 다음 로그인에서 다시 활성화됩니다.
pub fn delete_me(model: Model<User>) -> impl Fn(CurrentUser, RequestBody) -> HandlerFuture + Clone + 'static {
    move |current: CurrentUser, body: RequestBody| -> HandlerFuture {
        let model = model.clone();

        Box::pin(async move {
            let password = body_str(body.as_map(), "password")
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    AppError::BadRequest("Please provide your password to delete your account.".to_string())
                })?;

            let user = model
                .find_by_id(&current.id())?
                .select(&["password"])
                .one()
                .await?
                .ok_or_else(|| AppError::NotFound("User not found!".to_string()))?;

            let hash = user.password.as_deref().unwrap_or_default();
            if !model.passwords().verify_secret(password, hash) {
                return Err(AppError::BadRequest("Incorrect password! Please try again!".to_string()));
            }

            let id = parse_object_id(&current.id())?;
            model
                .update_without_validation(id, Update::set(doc! { "isActive": false }))
                .await?;

            log::info!("계정 비활성화: {}", id);
            Ok(HttpResponse::NoContent().finish())
        })
    }
}
