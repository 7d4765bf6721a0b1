mod inmemory;
mod postgres;

pub use inmemory::InMemoryAccessTokenRepo;
use invite_engine_domain::AccessToken;
pub use postgres::PostgresAccessTokenRepo;

#[async_trait::async_trait]
pub trait IAccessTokenRepo: Send + Sync {
    async fn insert(&self, token: &AccessToken) -> anyhow::Result<()>;
    /// Removes the token and returns it, a token can only be consumed once
    async fn consume(&self, token: &str) -> anyhow::Result<Option<AccessToken>>;
}

#[cfg(test)]
mod tests {
    use crate::InviteContext;
    use invite_engine_domain::AccessToken;

    #[tokio::test]
    async fn tokens_can_only_be_consumed_once() {
        let ctx = InviteContext::create_inmemory();
        let token = AccessToken::new(0);
        ctx.repos
            .access_tokens
            .insert(&token)
            .await
            .expect("To insert token");

        let consumed = ctx
            .repos
            .access_tokens
            .consume(&token.token)
            .await
            .expect("To consume token");
        assert_eq!(consumed, Some(token.clone()));
        assert!(ctx
            .repos
            .access_tokens
            .consume(&token.token)
            .await
            .expect("To consume token")
            .is_none());
    }

    #[tokio::test]
    async fn unknown_tokens_are_not_consumed() {
        let ctx = InviteContext::create_inmemory();
        assert!(ctx
            .repos
            .access_tokens
            .consume("test-token")
            .await
            .expect("To consume token")
            .is_none());
    }
}
