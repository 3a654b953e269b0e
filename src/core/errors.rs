//! # Application Error Handling System
//!
//! 챌린지 API 전역에서 사용하는 통합 에러 타입입니다.
//! 모든 핸들러와 미들웨어는 실패를 `AppError`로 전달하고,
//! `actix_web::ResponseError` 구현이 단일 지점에서 상태 코드와
//! 응답 엔벨로프(`{status, message}`)로 변환합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 엔벨로프 status |
//! |----------|-------------|-----------------|
//! | `BadRequest` | 400 Bad Request | `failed` |
//! | `ValidationError` | 400 Bad Request | `failed` |
//! | `InvalidToken` | 401 Unauthorized | `failed` |
//! | `AuthenticationError` | 401 Unauthorized | `failed` |
//! | `AuthorizationError` | 403 Forbidden | `failed` |
//! | `NotFound` | 404 Not Found | `failed` |
//! | `InternalError` | 500 Internal Server Error | `error` |
//! | `DatabaseError` | 500 Internal Server Error | `error` |
//!
//! `DatabaseError`의 원본 메시지는 서버 로그에만 남고 클라이언트에는
//! 일반 안내 문구만 전달됩니다.

use actix_web::http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::utils::response::send_json_res;

/// 내부 오류를 클라이언트에 노출하지 않을 때 사용하는 안내 문구
pub const GENERIC_ERROR_MESSAGE: &str =
    "No further information is available. Please try again later!";

/// 애플리케이션 전역 에러 타입
///
/// ## 에러 카테고리
///
/// ### 1. 입력 계층 에러
/// - `BadRequest`: 누락되었거나 형식이 잘못된 입력
/// - `ValidationError`: 스키마 검증 실패 (필드별 메시지 전체를 보존)
///
/// ### 2. 보안 계층 에러
/// - `InvalidToken`: 서명 불일치 또는 만료된 세션 토큰
/// - `AuthenticationError`: 인증 실패 (토큰 누락, 비밀번호 불일치 등)
/// - `AuthorizationError`: 역할 부족, 비활성 계정
///
/// ### 3. 인프라 계층 에러
/// - `DatabaseError`: MongoDB 연산 실패
/// - `InternalError`: 메일 발송 실패 등 하위 협력자 오류
///
/// ## 에러 변환 패턴
///
/// ```rust,ignore
/// collection.find_one(filter).await
///     .map_err(|e| AppError::DatabaseError(e.to_string()))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// 잘못된 요청
    ///
    /// 요청 본문이 비어 있거나, 허용된 필드가 하나도 없거나,
    /// 식별자 형식이 잘못된 경우 등에 사용합니다.
    #[error("{0}")]
    BadRequest(String),

    /// 스키마 검증 에러
    ///
    /// 스키마 검증기가 만들어낸 `"<필드>: <사유>"` 메시지를 모두 담습니다.
    /// 첫 번째 메시지만이 아니라 전체 목록이 줄바꿈으로 연결되어 응답됩니다.
    #[error("{}", .0.join("\n"))]
    ValidationError(Vec<String>),

    /// 세션 토큰 검증 실패
    ///
    /// 서명이 맞지 않거나 만료 시간이 지난 토큰입니다.
    #[error("{0}")]
    InvalidToken(String),

    /// 인증 실패 에러
    ///
    /// # 발생 시나리오
    /// - Authorization 헤더 누락
    /// - 잘못된 비밀번호
    /// - 토큰 발급 이후 비밀번호 변경
    #[error("{0}")]
    AuthenticationError(String),

    /// 권한 부족 에러
    ///
    /// `RestrictTo` 역할 검사 실패, 비활성화된 계정 접근 등에 사용합니다.
    #[error("{0}")]
    AuthorizationError(String),

    /// 리소스 찾을 수 없음 에러
    #[error("{0}")]
    NotFound(String),

    /// 데이터베이스 관련 에러
    ///
    /// 응답에는 일반 안내 문구만 포함되고 원본 메시지는 로그로 남습니다.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러
    ///
    /// 메시지는 코드에서 직접 작성한 안전한 문구여야 합니다.
    /// 그대로 클라이언트에 전달됩니다.
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트에 전달할 메시지
    pub fn public_message(&self) -> String {
        match self {
            AppError::DatabaseError(_) => GENERIC_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidToken(_) | AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 모든 에러 응답은 성공 응답과 같은 엔벨로프를 사용합니다:
    ///
    /// ```json
    /// {
    ///   "status": "failed",
    ///   "message": "Human readable error message"
    /// }
    /// ```
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("{}", self);
        }

        send_json_res(status, json!({ "message": self.public_message() }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// 원본 에러는 로그에만 남고, `InternalError`에는 `msg`만 담깁니다.
///
/// ```rust,ignore
/// let client = builder.build().context("메일 클라이언트 생성 실패")?;
/// ```
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| {
            log::error!("{}: {}", msg, e);
            AppError::InternalError(msg.to_string())
        })
    }
}
