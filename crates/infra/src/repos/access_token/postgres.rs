use super::IAccessTokenRepo;
use invite_engine_domain::AccessToken;
use sqlx::{FromRow, PgPool};

pub struct PostgresAccessTokenRepo {
    pool: PgPool,
}

impl PostgresAccessTokenRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccessTokenRaw {
    token: String,
    created_at: i64,
}

impl From<AccessTokenRaw> for AccessToken {
    fn from(raw: AccessTokenRaw) -> Self {
        Self {
            token: raw.token,
            created_at: raw.created_at,
        }
    }
}

#[async_trait::async_trait]
impl IAccessTokenRepo for PostgresAccessTokenRepo {
    async fn insert(&self, token: &AccessToken) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO access_tokens(token, created_at)
            VALUES($1, $2)
            "#,
        )
        .bind(&token.token)
        .bind(token.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn consume(&self, token: &str) -> anyhow::Result<Option<AccessToken>> {
        let token: Option<AccessTokenRaw> = sqlx::query_as(
            r#"
            DELETE FROM access_tokens AS t
            WHERE t.token = $1
            RETURNING *
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token.map(|t| t.into()))
    }
}
