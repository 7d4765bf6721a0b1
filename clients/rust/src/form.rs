use crate::{APIResponse, BaseClient};
use invite_engine_api_structs::submit_form;
use reqwest::StatusCode;
use std::sync::Arc;

pub type SubmitFormInput = submit_form::RequestBody;

#[derive(Clone)]
pub struct FormClient {
    base: Arc<BaseClient>,
}

impl FormClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn submit(&self, input: SubmitFormInput) -> APIResponse<submit_form::APIResponse> {
        self.base
            .post(
                input,
                "submit-form".into(),
                &[StatusCode::CREATED, StatusCode::OK],
            )
            .await
    }
}
