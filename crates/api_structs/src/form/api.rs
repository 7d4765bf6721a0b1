use crate::ReconcileResponse;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod submit_form {
    use super::*;

    /// Metadata form providers wrap the submitted fields in
    #[derive(Debug, Deserialize, Serialize, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct FormPayload {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub submitted_at: Option<String>,
        pub data: Map<String, Value>,
    }

    #[derive(Debug, Deserialize, Serialize, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct FormEnvelope {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub token: Option<String>,
        pub payload: FormPayload,
    }

    /// Either a provider envelope or the bare form fields
    #[derive(Debug, Deserialize, Serialize, Clone)]
    #[serde(untagged)]
    pub enum RequestBody {
        Envelope(FormEnvelope),
        Fields(Map<String, Value>),
    }

    impl RequestBody {
        pub fn token(&self) -> Option<&str> {
            match self {
                Self::Envelope(envelope) => envelope.token.as_deref(),
                Self::Fields(fields) => fields.get("token").and_then(|token| token.as_str()),
            }
        }

        pub fn data(&self) -> &Map<String, Value> {
            match self {
                Self::Envelope(envelope) => &envelope.payload.data,
                Self::Fields(fields) => fields,
            }
        }
    }

    pub type APIResponse = ReconcileResponse;
}
