use super::IFormSubmissionRepo;
use crate::repos::shared::inmemory_repo::*;
use invite_engine_domain::{FormSubmission, ID};

pub struct InMemoryFormSubmissionRepo {
    submissions: std::sync::Mutex<Vec<FormSubmission>>,
}

impl InMemoryFormSubmissionRepo {
    pub fn new() -> Self {
        Self {
            submissions: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IFormSubmissionRepo for InMemoryFormSubmissionRepo {
    async fn insert(&self, submission: &FormSubmission) -> anyhow::Result<()> {
        insert(submission, &self.submissions);
        Ok(())
    }

    async fn find(&self, submission_id: &ID) -> anyhow::Result<Option<FormSubmission>> {
        Ok(find(submission_id, &self.submissions))
    }
}
