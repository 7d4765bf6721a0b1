use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Record of one invite email the mail transport accepted.
///
/// Entries are only ever appended and are the source of truth for whether an
/// invite was sent, independent of `SelectedUser::last_invited_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteLedgerEntry {
    pub id: ID,
    /// Lookup reference only, the event may have been created by another entry
    pub event_id: ID,
    pub to: String,
    pub name: String,
    pub summary: String,
    pub location: String,
    pub sent_at: i64,
    pub organizer: String,
    pub source: String,
}

impl Entity for InviteLedgerEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}
