use super::IScheduledEventRepo;
use crate::repos::shared::query_structs::EventKeyQuery;
use invite_engine_domain::{
    EventDetails, EventMerge, Organizer, ScheduledEvent, SelectedUser, ID,
};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::collections::HashMap;

pub struct PostgresScheduledEventRepo {
    pool: PgPool,
}

impl PostgresScheduledEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduledEventRaw {
    event_uid: Uuid,
    summary: String,
    location: String,
    description: String,
    organizer_name: String,
    organizer_email: String,
    start_ts: i64,
    end_ts: i64,
    status: String,
    scheduled_time: i64,
}

#[derive(Debug, FromRow)]
struct RecipientRaw {
    event_uid: Uuid,
    email: String,
    name: String,
    last_invited_at: Option<i64>,
}

impl From<RecipientRaw> for SelectedUser {
    fn from(raw: RecipientRaw) -> Self {
        Self {
            name: raw.name,
            email: raw.email,
            last_invited_at: raw.last_invited_at,
        }
    }
}

impl ScheduledEventRaw {
    fn into_domain(self, selected_users: Vec<SelectedUser>) -> anyhow::Result<ScheduledEvent> {
        Ok(ScheduledEvent {
            id: self.event_uid.into(),
            event_details: EventDetails {
                summary: self.summary,
                location: self.location,
                description: self.description,
                organizer: Organizer {
                    name: self.organizer_name,
                    email: self.organizer_email,
                },
                start_ts: self.start_ts,
                end_ts: self.end_ts,
            },
            selected_users,
            status: self.status.parse()?,
            scheduled_time: self.scheduled_time,
        })
    }
}

const SELECT_EVENTS: &str = r#"
    SELECT event_uid, summary, location, description, organizer_name,
        organizer_email, start_ts, end_ts, status, scheduled_time
    FROM scheduled_events
"#;

impl PostgresScheduledEventRepo {
    /// Loads the recipients of the given events and joins them with the events
    async fn with_recipients(
        &self,
        events: Vec<ScheduledEventRaw>,
    ) -> anyhow::Result<Vec<ScheduledEvent>> {
        if events.is_empty() {
            return Ok(Vec::new());
        }
        let ids = events.iter().map(|e| e.event_uid).collect::<Vec<_>>();
        let recipients: Vec<RecipientRaw> = sqlx::query_as(
            r#"
            SELECT event_uid, email, name, last_invited_at FROM event_recipients
            WHERE event_uid = ANY($1)
            ORDER BY inserted_seq
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut recipients_by_event: HashMap<Uuid, Vec<SelectedUser>> = HashMap::new();
        for recipient in recipients {
            recipients_by_event
                .entry(recipient.event_uid)
                .or_default()
                .push(recipient.into());
        }

        events
            .into_iter()
            .map(|e| {
                let selected_users = recipients_by_event.remove(&e.event_uid).unwrap_or_default();
                e.into_domain(selected_users)
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl IScheduledEventRepo for PostgresScheduledEventRepo {
    async fn insert(&self, e: &ScheduledEvent) -> anyhow::Result<()> {
        let details = &e.event_details;
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO scheduled_events(
                event_uid,
                summary,
                location,
                description,
                organizer_name,
                organizer_email,
                start_ts,
                end_ts,
                status,
                scheduled_time
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(*e.id.inner_ref())
        .bind(&details.summary)
        .bind(&details.location)
        .bind(&details.description)
        .bind(&details.organizer.name)
        .bind(&details.organizer.email)
        .bind(details.start_ts)
        .bind(details.end_ts)
        .bind(e.status.as_str())
        .bind(e.scheduled_time)
        .execute(&mut *tx)
        .await?;

        for user in &e.selected_users {
            sqlx::query(
                r#"
                INSERT INTO event_recipients(event_uid, email, name, last_invited_at)
                VALUES($1, $2, $3, $4)
                ON CONFLICT (event_uid, email) DO NOTHING
                "#,
            )
            .bind(*e.id.inner_ref())
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.last_invited_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn merge(&self, event_id: &ID, merge: &EventMerge) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE scheduled_events SET
                end_ts = $2,
                description = $3,
                location = $4,
                organizer_name = $5,
                organizer_email = $6,
                scheduled_time = $7,
                status = $8
            WHERE event_uid = $1
            "#,
        )
        .bind(*event_id.inner_ref())
        .bind(merge.end_ts)
        .bind(&merge.description)
        .bind(&merge.location)
        .bind(&merge.organizer.name)
        .bind(&merge.organizer.email)
        .bind(merge.scheduled_time)
        .bind(merge.status.as_str())
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            return Err(anyhow::Error::msg(format!(
                "Scheduled event with id: {} was not found",
                event_id
            )));
        }

        let user = &merge.selected_user;
        sqlx::query(
            r#"
            INSERT INTO event_recipients(event_uid, email, name, last_invited_at)
            VALUES($1, $2, $3, $4)
            ON CONFLICT (event_uid, email) DO UPDATE SET
                name = EXCLUDED.name,
                last_invited_at = EXCLUDED.last_invited_at
            "#,
        )
        .bind(*event_id.inner_ref())
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.last_invited_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<ScheduledEvent>> {
        let event: Option<ScheduledEventRaw> =
            sqlx::query_as(&format!("{} WHERE event_uid = $1", SELECT_EVENTS))
                .bind(*event_id.inner_ref())
                .fetch_optional(&self.pool)
                .await?;

        match event {
            Some(event) => Ok(self.with_recipients(vec![event]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_key(&self, query: &EventKeyQuery) -> anyhow::Result<Vec<ScheduledEvent>> {
        let events: Vec<ScheduledEventRaw> = sqlx::query_as(&format!(
            "{} WHERE summary = $1 AND location = $2 AND organizer_email = $3 ORDER BY inserted_seq",
            SELECT_EVENTS
        ))
        .bind(&query.summary)
        .bind(&query.location)
        .bind(&query.organizer_email)
        .fetch_all(&self.pool)
        .await?;

        self.with_recipients(events).await
    }
}
