use super::IInviteLedgerRepo;
use crate::repos::shared::query_structs::RecentInviteQuery;
use invite_engine_domain::{InviteLedgerEntry, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresInviteLedgerRepo {
    pool: PgPool,
}

impl PostgresInviteLedgerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct InviteSentRaw {
    invite_uid: Uuid,
    event_uid: Uuid,
    recipient_email: String,
    recipient_name: String,
    summary: String,
    location: String,
    sent_at: i64,
    organizer_email: String,
    source: String,
}

impl From<InviteSentRaw> for InviteLedgerEntry {
    fn from(raw: InviteSentRaw) -> Self {
        Self {
            id: raw.invite_uid.into(),
            event_id: raw.event_uid.into(),
            to: raw.recipient_email,
            name: raw.recipient_name,
            summary: raw.summary,
            location: raw.location,
            sent_at: raw.sent_at,
            organizer: raw.organizer_email,
            source: raw.source,
        }
    }
}

#[async_trait::async_trait]
impl IInviteLedgerRepo for PostgresInviteLedgerRepo {
    async fn insert(&self, entry: &InviteLedgerEntry) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO invites_sent(
                invite_uid,
                event_uid,
                recipient_email,
                recipient_name,
                summary,
                location,
                sent_at,
                organizer_email,
                source
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(*entry.id.inner_ref())
        .bind(*entry.event_id.inner_ref())
        .bind(&entry.to)
        .bind(&entry.name)
        .bind(&entry.summary)
        .bind(&entry.location)
        .bind(entry.sent_at)
        .bind(&entry.organizer)
        .bind(&entry.source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_recent(
        &self,
        query: &RecentInviteQuery,
    ) -> anyhow::Result<Option<InviteLedgerEntry>> {
        let entry: Option<InviteSentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM invites_sent AS i
            WHERE i.recipient_email = $1 AND
            i.summary = $2 AND
            i.location = $3 AND
            i.sent_at >= $4
            ORDER BY i.sent_at DESC
            LIMIT 1
            "#,
        )
        .bind(&query.to)
        .bind(&query.summary)
        .bind(&query.location)
        .bind(query.sent_after)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry.map(|e| e.into()))
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<InviteLedgerEntry>> {
        let entries: Vec<InviteSentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM invites_sent AS i
            WHERE i.event_uid = $1
            ORDER BY i.sent_at
            "#,
        )
        .bind(*event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(entries.into_iter().map(|e| e.into()).collect())
    }
}
