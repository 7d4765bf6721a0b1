use crate::{APIResponse, BaseClient, ID};
use invite_engine_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

pub type ReconcileEventInput = reconcile_event::RequestBody;

#[derive(Clone)]
pub struct ScheduledEventClient {
    base: Arc<BaseClient>,
}

impl ScheduledEventClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Resolves to a created event with `201` and to an updated or skipped one with `200`
    pub async fn reconcile(
        &self,
        input: ReconcileEventInput,
    ) -> APIResponse<reconcile_event::APIResponse> {
        self.base
            .post(
                input,
                "events/reconcile".into(),
                &[StatusCode::CREATED, StatusCode::OK],
            )
            .await
    }

    pub async fn get(&self, event_id: &ID) -> APIResponse<get_event::APIResponse> {
        self.base
            .get(format!("events/{}", event_id), &[StatusCode::OK])
            .await
    }
}
