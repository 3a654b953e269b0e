//! 챌린지 연산별 검증 스키마

use crate::utils::validation::{FieldType, Schema};

/// 챌린지 생성 시 허용되는 필드
pub const CHALLENGE_FIELDS: &[&str] = &["category", "difficulty", "challengeTask", "challengeSolution"];

/// 풀이 제출 응답에 포함되는 필드
pub const SUBMISSION_RESPONSE_FIELDS: &[&str] = &["challengeTask", "challengeAttempt", "challengeSolution"];

/// 챌린지 생성/수정 스키마
pub fn challenge_schema() -> Schema {
    Schema::new()
        .field("category", FieldType::String)
        .field("difficulty", FieldType::String)
        .field("challengeTask", FieldType::String)
        .field("challengeSolution", FieldType::String)
}

/// 풀이 제출 스키마
///
/// 제출자는 `challengeAttempt`만 기록할 수 있습니다.
pub fn submission_schema() -> Schema {
    Schema::new().field("challengeAttempt", FieldType::String)
}
