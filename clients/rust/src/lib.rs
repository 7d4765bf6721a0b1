mod base;
mod event;
mod form;
mod status;
mod token;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use event::ScheduledEventClient;
pub use event::ReconcileEventInput;
use form::FormClient;
pub use form::SubmitFormInput;
pub use invite_engine_api_structs::dtos::*;
pub use invite_engine_api_structs::submit_form::{FormEnvelope, FormPayload};
pub use invite_engine_api_structs::reconcile_event::EventDetailsBody;
pub use invite_engine_api_structs::ReconcileResponse;
pub use invite_engine_domain::{Organizer, Recipient, SelectedUser, ID};
use status::StatusClient;
use std::sync::Arc;
use token::TokenClient;

// Domain
pub use invite_engine_api_structs::dtos::InviteSentDTO as InviteSent;
pub use invite_engine_api_structs::dtos::ScheduledEventDTO as ScheduledEvent;

/// Invite Engine Server SDK
///
/// The SDK contains methods for interacting with the invite engine server
/// API.
#[derive(Clone)]
pub struct InviteEngineSDK {
    pub event: ScheduledEventClient,
    pub form: FormClient,
    pub status: StatusClient,
    pub token: TokenClient,
}

impl InviteEngineSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let event = ScheduledEventClient::new(base.clone());
        let form = FormClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let token = TokenClient::new(base);

        Self {
            event,
            form,
            status,
            token,
        }
    }
}
