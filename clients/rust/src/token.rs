use crate::{APIResponse, BaseClient};
use invite_engine_api_structs::generate_token;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct TokenClient {
    base: Arc<BaseClient>,
}

impl TokenClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn generate(&self) -> APIResponse<generate_token::APIResponse> {
        self.base
            .post((), "tokens".into(), &[StatusCode::OK])
            .await
    }
}
