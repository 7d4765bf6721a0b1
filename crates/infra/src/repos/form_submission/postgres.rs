use super::IFormSubmissionRepo;
use invite_engine_domain::{FormSubmission, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};

pub struct PostgresFormSubmissionRepo {
    pool: PgPool,
}

impl PostgresFormSubmissionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FormSubmissionRaw {
    submission_uid: Uuid,
    payload: Json<serde_json::Value>,
    submitted_at: i64,
}

impl From<FormSubmissionRaw> for FormSubmission {
    fn from(raw: FormSubmissionRaw) -> Self {
        Self {
            id: raw.submission_uid.into(),
            payload: raw.payload.0,
            submitted_at: raw.submitted_at,
        }
    }
}

#[async_trait::async_trait]
impl IFormSubmissionRepo for PostgresFormSubmissionRepo {
    async fn insert(&self, submission: &FormSubmission) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO form_submissions(submission_uid, payload, submitted_at)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(*submission.id.inner_ref())
        .bind(Json(&submission.payload))
        .bind(submission.submitted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, submission_id: &ID) -> anyhow::Result<Option<FormSubmission>> {
        let submission: Option<FormSubmissionRaw> = sqlx::query_as(
            r#"
            SELECT * FROM form_submissions AS s
            WHERE s.submission_uid = $1
            "#,
        )
        .bind(*submission_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(submission.map(|s| s.into()))
    }
}
