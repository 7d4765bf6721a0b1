mod inmemory;
mod postgres;

use crate::repos::shared::query_structs::RecentInviteQuery;
pub use inmemory::InMemoryInviteLedgerRepo;
use invite_engine_domain::{InviteLedgerEntry, ID};
pub use postgres::PostgresInviteLedgerRepo;

/// Append only log of sent invites
#[async_trait::async_trait]
pub trait IInviteLedgerRepo: Send + Sync {
    async fn insert(&self, entry: &InviteLedgerEntry) -> anyhow::Result<()>;
    async fn find_recent(
        &self,
        query: &RecentInviteQuery,
    ) -> anyhow::Result<Option<InviteLedgerEntry>>;
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<InviteLedgerEntry>>;
}
