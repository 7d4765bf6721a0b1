mod access_token;
mod form_submission;
mod invite_ledger;
mod scheduled_event;
mod shared;

pub use access_token::IAccessTokenRepo;
use access_token::{InMemoryAccessTokenRepo, PostgresAccessTokenRepo};
pub use form_submission::IFormSubmissionRepo;
use form_submission::{InMemoryFormSubmissionRepo, PostgresFormSubmissionRepo};
pub use invite_ledger::IInviteLedgerRepo;
use invite_ledger::{InMemoryInviteLedgerRepo, PostgresInviteLedgerRepo};
pub use scheduled_event::IScheduledEventRepo;
use scheduled_event::{InMemoryScheduledEventRepo, PostgresScheduledEventRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

pub use shared::query_structs::*;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IScheduledEventRepo>,
    pub invites_sent: Arc<dyn IInviteLedgerRepo>,
    pub form_submissions: Arc<dyn IFormSubmissionRepo>,
    pub access_tokens: Arc<dyn IAccessTokenRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            events: Arc::new(PostgresScheduledEventRepo::new(pool.clone())),
            invites_sent: Arc::new(PostgresInviteLedgerRepo::new(pool.clone())),
            form_submissions: Arc::new(PostgresFormSubmissionRepo::new(pool.clone())),
            access_tokens: Arc::new(PostgresAccessTokenRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryScheduledEventRepo::new()),
            invites_sent: Arc::new(InMemoryInviteLedgerRepo::new()),
            form_submissions: Arc::new(InMemoryFormSubmissionRepo::new()),
            access_tokens: Arc::new(InMemoryAccessTokenRepo::new()),
        }
    }
}
