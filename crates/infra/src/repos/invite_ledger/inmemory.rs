use super::IInviteLedgerRepo;
use crate::repos::shared::{inmemory_repo::*, query_structs::RecentInviteQuery};
use invite_engine_domain::{InviteLedgerEntry, ID};

pub struct InMemoryInviteLedgerRepo {
    invites_sent: std::sync::Mutex<Vec<InviteLedgerEntry>>,
}

impl InMemoryInviteLedgerRepo {
    pub fn new() -> Self {
        Self {
            invites_sent: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IInviteLedgerRepo for InMemoryInviteLedgerRepo {
    async fn insert(&self, entry: &InviteLedgerEntry) -> anyhow::Result<()> {
        insert(entry, &self.invites_sent);
        Ok(())
    }

    async fn find_recent(
        &self,
        query: &RecentInviteQuery,
    ) -> anyhow::Result<Option<InviteLedgerEntry>> {
        let mut res = find_by(&self.invites_sent, |entry| {
            entry.to == query.to
                && entry.summary == query.summary
                && entry.location == query.location
                && entry.sent_at >= query.sent_after
        });
        Ok(res.pop())
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<InviteLedgerEntry>> {
        Ok(find_by(&self.invites_sent, |entry| entry.event_id == *event_id))
    }
}
