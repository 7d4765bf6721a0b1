use invite_engine_domain::AccessToken;
use serde::{Deserialize, Serialize};

pub mod generate_token {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub token: String,
    }

    impl APIResponse {
        pub fn new(token: AccessToken) -> Self {
            Self { token: token.token }
        }
    }
}
