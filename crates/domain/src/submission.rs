use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Raw form payload as it was received, kept for auditing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub id: ID,
    pub payload: serde_json::Value,
    pub submitted_at: i64,
}

impl FormSubmission {
    pub fn new(payload: serde_json::Value, submitted_at: i64) -> Self {
        Self {
            id: Default::default(),
            payload,
            submitted_at,
        }
    }
}

impl Entity for FormSubmission {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Single use token handed out to form pages before they submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub token: String,
    pub created_at: i64,
}

impl AccessToken {
    pub fn new(created_at: i64) -> Self {
        Self {
            token: ID::new().as_string(),
            created_at,
        }
    }

    pub fn is_expired(&self, now: i64, ttl: i64) -> bool {
        now - self.created_at > ttl
    }
}
