//! 원시 JSON 요청 본문 추출자
//!
//! 핸들러 파이프라인은 "본문이 비었는가"와 "화이트리스트 후 남은 필드가 있는가"를
//! 구분해서 응답해야 하므로, 본문을 구조체로 바로 역직렬화하지 않고
//! JSON 객체 그대로 받습니다.

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde_json::{Map, Value};

use crate::core::errors::AppError;

/// JSON 객체 본문
///
/// - 본문 없음 또는 `null` → 빈 맵
/// - 객체가 아닌 JSON → `BadRequest`
/// - 잘못된 JSON → `BadRequest`
#[derive(Debug, Clone, Default)]
pub struct RequestBody(pub Map<String, Value>);

impl RequestBody {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// 바이트열을 본문 맵으로 해석합니다.
    pub fn parse(bytes: &[u8]) -> Result<Self, AppError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(Value::Null) => Ok(Self::default()),
            Ok(_) => Err(AppError::BadRequest(
                "Request body must be a JSON object!".to_string(),
            )),
            Err(e) => Err(AppError::BadRequest(format!("Invalid JSON in request body: {}", e))),
        }
    }
}

impl FromRequest for RequestBody {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let bytes = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            let bytes = bytes
                .await
                .map_err(|e| AppError::BadRequest(format!("Could not read request body: {}", e)))?;

            RequestBody::parse(&bytes)
        })
    }
}
