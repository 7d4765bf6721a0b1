use crate::dtos::{InviteSentDTO, ReconcileOutcomeDTO, ScheduledEventDTO, SkipReasonDTO};
use invite_engine_domain::{InviteLedgerEntry, Organizer, Recipient, ScheduledEvent, ID};
use serde::{Deserialize, Serialize};

/// Result of reconciling one invite request
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResponse {
    pub success: bool,
    pub event_id: Option<ID>,
    pub outcome: ReconcileOutcomeDTO,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReasonDTO>,
    pub message: String,
}

pub mod reconcile_event {
    use super::*;

    #[derive(Debug, Deserialize, Serialize, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct EventDetailsBody {
        pub summary: String,
        #[serde(default)]
        pub location: String,
        pub description: Option<String>,
        pub organizer: Organizer,
        pub start_ts: i64,
        pub end_ts: i64,
    }

    #[derive(Debug, Deserialize, Serialize, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub event_details: EventDetailsBody,
        pub selected_user: Recipient,
    }

    pub type APIResponse = ReconcileResponse;
}

pub mod get_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub event: ScheduledEventDTO,
        pub invites: Vec<InviteSentDTO>,
    }

    impl APIResponse {
        pub fn new(event: ScheduledEvent, invites: Vec<InviteLedgerEntry>) -> Self {
            Self {
                event: ScheduledEventDTO::new(event),
                invites: invites.into_iter().map(InviteSentDTO::new).collect(),
            }
        }
    }
}
