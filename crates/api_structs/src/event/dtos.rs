use invite_engine_domain::{
    EventStatus, InviteLedgerEntry, Organizer, ScheduledEvent, SelectedUser, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEventDTO {
    pub id: ID,
    pub summary: String,
    pub location: String,
    pub description: String,
    pub organizer: Organizer,
    pub start_ts: i64,
    pub end_ts: i64,
    pub selected_users: Vec<SelectedUser>,
    pub status: EventStatus,
    pub scheduled_time: i64,
}

impl ScheduledEventDTO {
    pub fn new(event: ScheduledEvent) -> Self {
        let details = event.event_details;
        Self {
            id: event.id,
            summary: details.summary,
            location: details.location,
            description: details.description,
            organizer: details.organizer,
            start_ts: details.start_ts,
            end_ts: details.end_ts,
            selected_users: event.selected_users,
            status: event.status,
            scheduled_time: event.scheduled_time,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InviteSentDTO {
    pub id: ID,
    pub event_id: ID,
    pub to: String,
    pub name: String,
    pub summary: String,
    pub location: String,
    pub sent_at: i64,
    pub organizer: String,
    pub source: String,
}

impl InviteSentDTO {
    pub fn new(entry: InviteLedgerEntry) -> Self {
        Self {
            id: entry.id,
            event_id: entry.event_id,
            to: entry.to,
            name: entry.name,
            summary: entry.summary,
            location: entry.location,
            sent_at: entry.sent_at,
            organizer: entry.organizer,
            source: entry.source,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileOutcomeDTO {
    Created,
    Updated,
    Skipped,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SkipReasonDTO {
    RecentDuplicate,
    LedgerDuplicate,
}
