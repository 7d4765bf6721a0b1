use invite_engine_domain::EventKey;

/// Query for events with the same summary, location and organizer email.
/// The day is not part of the query, callers pick the day themselves.
#[derive(Debug, Clone)]
pub struct EventKeyQuery {
    pub summary: String,
    pub location: String,
    pub organizer_email: String,
}

impl From<&EventKey> for EventKeyQuery {
    fn from(key: &EventKey) -> Self {
        Self {
            summary: key.summary.clone(),
            location: key.location.clone(),
            organizer_email: key.organizer_email.clone(),
        }
    }
}

/// Query for invites to `to` about the same summary and location
/// that were sent at or after `sent_after`
#[derive(Debug, Clone)]
pub struct RecentInviteQuery {
    pub to: String,
    pub summary: String,
    pub location: String,
    pub sent_after: i64,
}
