use serde::{Deserialize, Serialize};

use crate::domain::entities::challenges::challenge::Challenge;

/// 챌린지 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub id: String,
    pub category: String,
    pub difficulty: String,
    pub challenge_task: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_solution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_attempt: Option<String>,
}

impl From<&Challenge> for ChallengeResponse {
    fn from(challenge: &Challenge) -> Self {
        Self {
            id: challenge.id.map(|id| id.to_hex()).unwrap_or_default(),
            category: challenge.category.clone(),
            difficulty: challenge.difficulty.clone(),
            challenge_task: challenge.challenge_task.clone(),
            challenge_solution: challenge.challenge_solution.clone(),
            challenge_attempt: challenge.challenge_attempt.clone(),
        }
    }
}
