use super::IAccessTokenRepo;
use crate::repos::shared::inmemory_repo::*;
use invite_engine_domain::AccessToken;

pub struct InMemoryAccessTokenRepo {
    tokens: std::sync::Mutex<Vec<AccessToken>>,
}

impl InMemoryAccessTokenRepo {
    pub fn new() -> Self {
        Self {
            tokens: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAccessTokenRepo for InMemoryAccessTokenRepo {
    async fn insert(&self, token: &AccessToken) -> anyhow::Result<()> {
        insert(token, &self.tokens);
        Ok(())
    }

    async fn consume(&self, token: &str) -> anyhow::Result<Option<AccessToken>> {
        Ok(find_and_delete_by(&self.tokens, |t| t.token == token).pop())
    }
}
