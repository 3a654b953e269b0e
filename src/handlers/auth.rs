//! # 인증 핸들러
//!
//! 회원가입, 로그인, 비밀번호 변경/재설정 흐름을 처리합니다.
//!
//! ## 재설정 토큰 상태
//!
//! ```text
//! (없음) ──forgotPassword──▶ 발급됨(hash, 만료 시각 저장)
//!   ▲                          │
//!   │  메일 발송 실패          ├──resetPassword (만료 전)──▶ (없음) + 새 비밀번호
//!   └──────────────────────────┤
//!                              └──만료 시각 경과──▶ 사용 불가 (400)
//! ```

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::HttpRequest;
use chrono::Utc;
use mongodb::bson::{doc, DateTime};
use serde_json::{json, Map, Value};
use validator::Validate;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::request::ForgotPasswordRequest;
use crate::domain::dto::RequestBody;
use crate::domain::entities::users::user::User;
use crate::domain::entities::Entity;
use crate::domain::models::auth::CurrentUser;
use crate::handlers::factory::{to_bson_document, HandlerFuture};
use crate::repositories::model::{parse_object_id, Model};
use crate::repositories::store::Update;
use crate::services::auth::{hash_token, issue_one_time_token, TokenService, RESET_TOKEN_BYTES, RESET_TOKEN_TTL_MS};
use crate::services::mail::{MailMessage, Mailer};
use crate::utils::filter::filter_obj;
use crate::utils::response::send_json_res;
use crate::utils::string_utils::{body_str, clean_optional_string, is_valid_string, trimmed_field};
use crate::utils::validation::Schema;

const RESET_MAIL_SUBJECT: &str = "Your password reset token (valid for only 15 minutes).";
const INVALID_RESET_TOKEN: &str =
    "Token is invalid or has expired. Please send another request to reset your password.";

/// 새 세션 토큰과 사용자 공개 표현을 담은 응답
fn user_token_payload(user: &User, token: String) -> Value {
    json!({ "token": token, "data": { "user": user.to_public() } })
}

/// 세션 토큰 발급
///
/// 발급 시각은 항상 마지막 비밀번호 변경 시각보다 뒤입니다.
fn session_token(tokens: &TokenService, user: &User) -> AppResult<String> {
    let id = user
        .id_string()
        .ok_or_else(|| AppError::InternalError("User has no identifier".to_string()))?;

    let now = Utc::now();
    let issued_at = user
        .password_changed_at
        .and_then(|changed_at| chrono::DateTime::from_timestamp_millis(changed_at.timestamp_millis() + 1))
        .map_or(now, |after_change| after_change.max(now));

    tokens.issue_session_token_at(&id, issued_at)
}

/// 비어 있지 않은 문자열 필드
fn required_str<'a>(body: &'a RequestBody, key: &str) -> Option<&'a str> {
    body_str(body.as_map(), key).filter(|value| is_valid_string(value))
}

/// 회원가입
///
/// `required_fields`가 화이트리스트이자 필수 목록입니다. 일부만 보낸 가입 요청은 거부됩니다.
pub fn signup_user(
    model: Model<User>,
    schema: Schema,
    required_fields: &'static [&'static str],
    tokens: Arc<TokenService>,
) -> impl Fn(RequestBody) -> HandlerFuture + Clone + 'static {
    move |body: RequestBody| -> HandlerFuture {
        let model = model.clone();
        let schema = schema.clone();
        let tokens = Arc::clone(&tokens);

        Box::pin(async move {
            if body.is_empty() {
                return Err(AppError::BadRequest(
                    "Please provide a username, email, password and password confirmation!".to_string(),
                ));
            }

            let filtered = filter_obj(required_fields, body.as_map());
            if filtered.is_empty() {
                return Err(AppError::BadRequest(
                    "No valid data was received, please enter a valid username, email and password".to_string(),
                ));
            }

            schema.validate(&filtered, false)?;

            if !required_fields.iter().all(|field| filtered.contains_key(*field)) {
                return Err(AppError::BadRequest(format!(
                    "Data is missing one or more required fields! Required fields: {}",
                    required_fields.join(",")
                )));
            }

            let user = model.create(to_bson_document(&filtered)?).await?;
            let token = session_token(&tokens, &user)?;

            log::info!("신규 사용자 가입: {}", user.id_string().unwrap_or_default());
            Ok(send_json_res(StatusCode::CREATED, user_token_payload(&user, token)))
        })
    }
}

/// 로그인
///
/// 비활성화된 계정은 로그인에 성공하면 다시 활성화됩니다.
pub fn login_user(
    model: Model<User>,
    tokens: Arc<TokenService>,
) -> impl Fn(RequestBody) -> HandlerFuture + Clone + 'static {
    move |body: RequestBody| -> HandlerFuture {
        let model = model.clone();
        let tokens = Arc::clone(&tokens);

        Box::pin(async move {
            let (Some(email), Some(password)) = (
                trimmed_field(body.as_map(), "email"),
                trimmed_field(body.as_map(), "password"),
            ) else {
                return Err(AppError::BadRequest(
                    "Please provide an email and password to login!".to_string(),
                ));
            };

            if email.is_empty() || password.is_empty() {
                return Err(AppError::BadRequest(
                    "Email or password cannot be empty! Please enter a valid email and password!".to_string(),
                ));
            }

            let user = model
                .find(doc! { "email": email.as_str() })
                .select(&["password", "passwordChangedAt"])
                .one()
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(
                        "No user was found with that email. Please try again or create a new account."
                            .to_string(),
                    )
                })?;

            let hash = user.password.as_deref().unwrap_or_default();
            if !model.passwords().verify_secret(&password, hash) {
                log::warn!("로그인 실패: 비밀번호 불일치 ({})", email);
                return Err(AppError::AuthenticationError(
                    "Incorrect password! Please try again!".to_string(),
                ));
            }

            let mut payload = Map::new();
            let user = if user.is_active {
                user
            } else {
                let id = user
                    .id
                    .ok_or_else(|| AppError::InternalError("User has no identifier".to_string()))?;
                let reactivated = model
                    .update_without_validation(id, Update::set(doc! { "isActive": true }))
                    .await?
                    .ok_or_else(|| AppError::NotFound("User not found!".to_string()))?;

                log::info!("계정 재활성화: {}", id);
                payload.insert(
                    "message".to_string(),
                    Value::String("Welcome back! Your account has been reactivated.".to_string()),
                );
                reactivated
            };

            let token = session_token(&tokens, &user)?;
            if let Value::Object(fields) = user_token_payload(&user, token) {
                payload.extend(fields);
            }

            Ok(send_json_res(StatusCode::OK, Value::Object(payload)))
        })
    }
}

/// 현재 비밀번호 확인 후 비밀번호 변경
///
/// 변경 후 새 세션 토큰을 발급합니다. 변경 이전에 발급된 토큰은 무효가 됩니다.
pub fn update_my_password(
    model: Model<User>,
    tokens: Arc<TokenService>,
) -> impl Fn(CurrentUser, RequestBody) -> HandlerFuture + Clone + 'static {
    move |current: CurrentUser, body: RequestBody| -> HandlerFuture {
        let model = model.clone();
        let tokens = Arc::clone(&tokens);

        Box::pin(async move {
            let user = model
                .find_by_id(&current.id())?
                .select(&["password"])
                .one()
                .await?
                .ok_or_else(|| {
                    AppError::InternalError(
                        "This request cannot be processed at this time, please try again later.".to_string(),
                    )
                })?;

            let current_password = required_str(&body, "currentPassword")
                .ok_or_else(|| AppError::BadRequest("Please provide your current password.".to_string()))?;

            let hash = user.password.as_deref().unwrap_or_default();
            if !model.passwords().verify_secret(current_password, hash) {
                return Err(AppError::BadRequest(
                    "Please ensure that your current password is correct.".to_string(),
                ));
            }

            let new_password = required_str(&body, "newPassword")
                .ok_or_else(|| AppError::BadRequest("Please provide a new password!".to_string()))?;

            if new_password == current_password {
                return Err(AppError::BadRequest(
                    "The new password must be different from your current password.".to_string(),
                ));
            }

            let confirm_password = required_str(&body, "confirmPassword")
                .ok_or_else(|| AppError::BadRequest("Please confirm your password.".to_string()))?;

            if confirm_password != new_password {
                return Err(AppError::BadRequest(
                    "Passwords do not match. Please make sure both fields are identical.".to_string(),
                ));
            }

            let id = parse_object_id(&current.id())?;
            let updated = model
                .update_by_id(id, Update::set(doc! { "password": new_password }), &["passwordChangedAt"])
                .await?
                .ok_or_else(|| AppError::NotFound("User not found!".to_string()))?;

            let token = session_token(&tokens, &updated)?;

            log::info!("비밀번호 변경: {}", id);
            Ok(send_json_res(
                StatusCode::OK,
                json!({ "message": "Password was successfully updated!", "token": token }),
            ))
        })
    }
}

/// 비밀번호 재설정 메일 요청
///
/// 평문 토큰은 메일로만 전달되고 응답에는 포함되지 않습니다.
/// 발송에 실패하면 방금 저장한 재설정 필드를 지우고 500을 반환합니다.
pub fn forgot_password(
    model: Model<User>,
    mailer: Arc<dyn Mailer>,
) -> impl Fn(HttpRequest, RequestBody) -> HandlerFuture + Clone + 'static {
    move |req: HttpRequest, body: RequestBody| -> HandlerFuture {
        let model = model.clone();
        let mailer = Arc::clone(&mailer);

        Box::pin(async move {
            let email = clean_optional_string(body_str(body.as_map(), "email")).ok_or_else(|| {
                AppError::BadRequest("Please provide an email to reset your password.".to_string())
            })?;

            let request = ForgotPasswordRequest { email };
            request.validate().map_err(|_| {
                AppError::BadRequest(
                    "Invalid email address submitted, please provide a valid email address.".to_string(),
                )
            })?;

            let user = model
                .find(doc! { "email": request.email.as_str() })
                .one()
                .await?
                .ok_or_else(|| {
                    AppError::NotFound("No document was found with that email, please try again.".to_string())
                })?;
            let id = user
                .id
                .ok_or_else(|| AppError::InternalError("User has no identifier".to_string()))?;

            let reset = issue_one_time_token(RESET_TOKEN_BYTES, RESET_TOKEN_TTL_MS);
            model
                .update_without_validation(
                    id,
                    Update::set(doc! {
                        "passwordResetToken": reset.hash.as_str(),
                        "passwordResetTokenExpiration": reset.expires_at,
                    }),
                )
                .await?;

            let reset_url = {
                let info = req.connection_info();
                format!("{}://{}/users/resetPassword/{}", info.scheme(), info.host(), reset.plaintext)
            };

            let message = MailMessage {
                to: user.email.clone(),
                subject: RESET_MAIL_SUBJECT.to_string(),
                text: format!(
                    "Forgot your password? Submit a PATCH request with your new password and passwordConfirm to: {}.\n\
                     If you didn't forget your password, please ignore this email.",
                    reset_url
                ),
            };

            if let Err(err) = mailer.send(message).await {
                log::error!("재설정 메일 발송 실패 ({}): {}", id, err);

                model
                    .update_without_validation(
                        id,
                        Update::default()
                            .unset("passwordResetToken")
                            .unset("passwordResetTokenExpiration"),
                    )
                    .await?;

                return Err(AppError::InternalError(
                    "There was an error sending the mail. Try again later!".to_string(),
                ));
            }

            Ok(send_json_res(StatusCode::OK, json!({ "message": "Token sent to email." })))
        })
    }
}

/// 재설정 토큰으로 비밀번호 재설정
///
/// 토큰은 해시로만 조회하며, 성공하면 재설정 필드를 지우고 새 세션 토큰을 발급합니다.
pub fn reset_password(
    model: Model<User>,
    tokens: Arc<TokenService>,
) -> impl Fn(HttpRequest, RequestBody) -> HandlerFuture + Clone + 'static {
    move |req: HttpRequest, body: RequestBody| -> HandlerFuture {
        let model = model.clone();
        let tokens = Arc::clone(&tokens);

        Box::pin(async move {
            let token_hash = hash_token(req.match_info().query("resetToken"));

            let user = model
                .find(doc! { "passwordResetToken": token_hash })
                .select(&["password", "passwordResetTokenExpiration"])
                .one()
                .await?
                .filter(|user| !user.reset_token_expired(DateTime::now()))
                .ok_or_else(|| AppError::BadRequest(INVALID_RESET_TOKEN.to_string()))?;

            let password = required_str(&body, "password")
                .ok_or_else(|| AppError::BadRequest("Please provide a new password!".to_string()))?;
            let password_confirm = required_str(&body, "passwordConfirm")
                .ok_or_else(|| AppError::BadRequest("Please confirm your new password!".to_string()))?;

            let hash = user.password.as_deref().unwrap_or_default();
            if model.passwords().verify_secret(password, hash) {
                return Err(AppError::BadRequest(
                    "Your new password must be different from your current password.".to_string(),
                ));
            }

            let id = user
                .id
                .ok_or_else(|| AppError::InternalError("User has no identifier".to_string()))?;

            let update = Update::set(doc! { "password": password, "confirmPassword": password_confirm })
                .unset("passwordResetToken")
                .unset("passwordResetTokenExpiration");

            let updated = model
                .update_by_id(id, update, &["passwordChangedAt"])
                .await?
                .ok_or_else(|| AppError::BadRequest(INVALID_RESET_TOKEN.to_string()))?;

            let token = session_token(&tokens, &updated)?;

            log::info!("비밀번호 재설정 완료: {}", id);
            Ok(send_json_res(StatusCode::OK, json!({ "token": token })))
        })
    }
}
