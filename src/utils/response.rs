//! # 응답 엔벨로프
//!
//! 모든 JSON 응답은 `{ status, ...payload }` 형태를 가집니다.
//! `status`는 HTTP 상태 코드의 첫 자리로만 결정됩니다.
//!
//! | 상태 코드 | status |
//! |-----------|--------|
//! | 2xx | `successful` |
//! | 4xx | `failed` |
//! | 5xx | `error` |

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde_json::{Map, Value};

/// 상태 코드에 대응하는 엔벨로프 status 문자열
pub fn status_label(status: StatusCode) -> Option<&'static str> {
    match status.as_u16() / 100 {
        2 => Some("successful"),
        4 => Some("failed"),
        5 => Some("error"),
        _ => None,
    }
}

/// 엔벨로프로 감싼 JSON 응답을 생성합니다.
///
/// `payload`가 객체이면 그 키들이 `status` 옆에 펼쳐집니다.
///
/// ```rust,ignore
/// send_json_res(StatusCode::OK, json!({ "token": token }));
/// // => { "status": "successful", "token": "..." }
/// ```
pub fn send_json_res(status: StatusCode, payload: Value) -> HttpResponse {
    let mut body = Map::new();

    match status_label(status) {
        Some(label) => {
            body.insert("status".to_string(), Value::String(label.to_string()));
        }
        None => {
            log::warn!("응답 status를 결정할 수 없는 상태 코드입니다: {}", status);
            body.insert("status".to_string(), Value::Null);
        }
    }

    match payload {
        Value::Object(fields) => body.extend(fields),
        Value::Null => {}
        other => {
            body.insert("data".to_string(), other);
        }
    }

    HttpResponse::build(status).json(Value::Object(body))
}

/// 공개 표현에서 지정한 필드만 남깁니다.
///
/// 식별자(`id`)는 항상 유지됩니다. 객체가 아닌 값은 그대로 돌려줍니다.
pub fn project_fields<S: AsRef<str>>(value: Value, fields: &[S]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| key == "id" || fields.iter().any(|f| f.as_ref() == key))
                .collect(),
        ),
        other => other,
    }
}
