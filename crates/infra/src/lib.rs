mod config;
mod locks;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use locks::{EventKeyGuard, EventKeyLocks};
pub use repos::*;
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};

const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com/emails";

#[derive(Clone)]
pub struct InviteContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn INotificationSender>,
    pub invite_builder: Arc<dyn IInvitePayloadBuilder>,
    pub event_locks: EventKeyLocks,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
    pub mail_api: Option<(String, String)>,
}

impl InviteContext {
    fn with_repos(repos: Repos, mailer: Arc<dyn INotificationSender>) -> Self {
        let config = Config::new();
        Self {
            repos,
            invite_builder: Arc::new(IcsInviteBuilder::new(config.invite_domain.clone())),
            config,
            sys: Arc::new(RealSys {}),
            mailer,
            event_locks: EventKeyLocks::new(),
        }
    }

    async fn create(params: ContextParams) -> Self {
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string)
                .await
                .expect("Postgres credentials must be valid"),
            None => {
                warn!("DATABASE_URL is not set, events will only be kept in memory");
                Repos::create_inmemory()
            }
        };
        let mailer: Arc<dyn INotificationSender> = match params.mail_api {
            Some((api_url, api_key)) => {
                info!("Sending invite emails through: {}", api_url);
                Arc::new(HttpMailer::new(api_url, api_key))
            }
            None => {
                warn!("MAIL_API_KEY is not set, invite emails will only be kept in memory");
                Arc::new(InMemoryMailer::new())
            }
        };
        Self::with_repos(repos, mailer)
    }

    /// Context with in-memory repositories and mailer
    pub fn create_inmemory() -> Self {
        Self::with_repos(Repos::create_inmemory(), Arc::new(InMemoryMailer::new()))
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> InviteContext {
    InviteContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
        mail_api: get_mail_api(),
    })
    .await
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .ok()
        .filter(|conn| !conn.trim().is_empty())
}

fn get_mail_api() -> Option<(String, String)> {
    let api_key = std::env::var("MAIL_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())?;
    let api_url = std::env::var("MAIL_API_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MAIL_API_URL.to_string());
    Some((api_url, api_key))
}

/// Runs the embedded migrations when a postgres database is configured
pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = match get_psql_connection_string() {
        Some(conn) => conn,
        None => return Ok(()),
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await
}
