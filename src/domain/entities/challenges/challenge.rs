use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::challenges::response::ChallengeResponse;
use crate::domain::entities::{required_field_messages, Entity, WriteKind};
use crate::services::auth::PasswordService;
use crate::utils::validation::FieldType;

/// 챌린지 엔티티
///
/// `challengeSolution`과 `challengeAttempt`는 숨김 필드입니다.
/// 목록/단건 조회에서는 빠지고, 명시적으로 선택한 연산에서만 반환됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub challenge_task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_attempt: Option<String>,
}

const REQUIRED_ON_WRITE: &[(&str, &str)] = &[
    ("category", "A challenge must have a category!"),
    ("difficulty", "A challenge must have a difficulty!"),
    ("challengeTask", "A challenge must have a task!"),
    ("challengeSolution", "A challenge must have a solution!"),
];

impl Entity for Challenge {
    const COLLECTION: &'static str = "challenges";

    const HIDDEN_FIELDS: &'static [&'static str] = &["challengeSolution", "challengeAttempt"];

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn to_public(&self) -> Value {
        serde_json::to_value(ChallengeResponse::from(self)).unwrap_or(Value::Null)
    }

    fn field_type(field: &str) -> Option<FieldType> {
        match field {
            "category" | "difficulty" | "challengeTask" | "challengeSolution" | "challengeAttempt" => {
                Some(FieldType::String)
            }
            _ => None,
        }
    }

    fn prepare_write(doc: &mut Document, kind: WriteKind, _passwords: &PasswordService) -> AppResult<()> {
        let messages = required_field_messages(doc, REQUIRED_ON_WRITE, kind);

        if messages.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(messages))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_create_requires_every_field() {
        let mut doc = doc! { "category": "strings" };

        let err = Challenge::prepare_write(&mut doc, WriteKind::Create, &PasswordService::new(4)).unwrap_err();

        assert_eq!(
            err.to_string(),
            "difficulty: A challenge must have a difficulty!\n\
             challengeTask: A challenge must have a task!\n\
             challengeSolution: A challenge must have a solution!"
        );
    }

    #[test]
    fn test_update_allows_partial_documents() {
        let mut doc = doc! { "challengeAttempt": "my answer" };

        assert!(Challenge::prepare_write(&mut doc, WriteKind::Update, &PasswordService::new(4)).is_ok());
    }

    #[test]
    fn test_public_representation_omits_unloaded_hidden_fields() {
        let challenge = Challenge {
            id: Some(ObjectId::new()),
            category: "strings".to_string(),
            difficulty: "easy".to_string(),
            challenge_task: "reverse a string".to_string(),
            challenge_solution: None,
            challenge_attempt: None,
        };

        let public = challenge.to_public();

        assert!(public.get("challengeSolution").is_none());
        assert_eq!(public["challengeTask"], "reverse a string");
        assert!(public["id"].is_string());
    }
}
