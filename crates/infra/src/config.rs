use invite_engine_domain::Organizer;
use std::{fmt::Display, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Minimum time in millis between two invites to the same user for the
    /// same `ScheduledEvent`, checked against `SelectedUser::last_invited_at`.
    pub recipient_cooldown_millis: i64,
    /// Window in millis in which an entry in the invite ledger for the same
    /// recipient, summary and location suppresses a new invite.
    pub ledger_cooldown_millis: i64,
    /// Serialize reconciliations of the same event key within this process
    pub serialize_by_event_key: bool,
    /// Require a single use access token on form submissions
    pub require_access_token: bool,
    /// How long an issued access token stays valid
    pub access_token_ttl_millis: i64,
    /// Origin allowed to call the api from a browser, permissive when not set
    pub cors_allowed_origin: Option<String>,
    /// Organizer of events created from web form submissions
    pub organizer: Organizer,
    pub email_from: String,
    pub email_from_name: String,
    /// Domain used in the UID of generated calendar invites
    pub invite_domain: String,
    /// Tag stored on every invite ledger entry
    pub ledger_source: String,
}

fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default value: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn string_env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            info!(
                "Did not find {} environment variable. Using: {}",
                key, default
            );
            default.to_string()
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let email_from = string_env_or("EMAIL_FROM", "no-reply@stagholme.com");
        let email_from_name = string_env_or("EMAIL_FROM_NAME", "Event Invitations");
        let organizer = Organizer {
            name: string_env_or("ORGANIZER_NAME", &email_from_name),
            email: string_env_or("ORGANIZER_EMAIL", &email_from),
        };
        let cors_allowed_origin = std::env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .filter(|origin| !origin.trim().is_empty());

        Self {
            port: parse_env_or("PORT", 5000),
            recipient_cooldown_millis: parse_env_or("RECIPIENT_COOLDOWN_MS", 1000 * 60 * 2), // 2 minutes
            ledger_cooldown_millis: parse_env_or("LEDGER_COOLDOWN_MS", 1000 * 60 * 10), // 10 minutes
            serialize_by_event_key: parse_env_or("SERIALIZE_BY_EVENT_KEY", true),
            require_access_token: parse_env_or("REQUIRE_ACCESS_TOKEN", false),
            access_token_ttl_millis: parse_env_or("ACCESS_TOKEN_TTL_MS", 1000 * 60 * 60), // 1 hour
            cors_allowed_origin,
            organizer,
            email_from,
            email_from_name,
            invite_domain: string_env_or("INVITE_DOMAIN", "stagholme.com"),
            ledger_source: string_env_or("LEDGER_SOURCE", "microservice"),
        }
    }

    /// Mailbox used in the `from` header of invite emails
    pub fn sender_mailbox(&self) -> String {
        format!("{} <{}>", self.email_from_name, self.email_from)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
