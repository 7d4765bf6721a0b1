mod inmemory;
mod postgres;

pub use inmemory::InMemoryFormSubmissionRepo;
use invite_engine_domain::{FormSubmission, ID};
pub use postgres::PostgresFormSubmissionRepo;

#[async_trait::async_trait]
pub trait IFormSubmissionRepo: Send + Sync {
    async fn insert(&self, submission: &FormSubmission) -> anyhow::Result<()>;
    async fn find(&self, submission_id: &ID) -> anyhow::Result<Option<FormSubmission>>;
}
