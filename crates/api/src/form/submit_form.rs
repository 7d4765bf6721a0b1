use crate::error::InviteEngineError;
use crate::event::reconcile_event::{
    reconcile_response, ReconcileEventUseCase, ReconcileOutcome,
    UseCaseError as ReconcileError,
};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use invite_engine_api_structs::submit_form::*;
use invite_engine_domain::{
    normalize_form_submission, FormFields, FormNormalizationError, FormSubmission,
};
use invite_engine_infra::InviteContext;
use tracing::info;

pub async fn submit_form_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<InviteContext>,
) -> Result<HttpResponse, InviteEngineError> {
    let usecase = SubmitFormUseCase { body: body.0 };

    execute(usecase, &ctx)
        .await
        .map(reconcile_response)
        .map_err(InviteEngineError::from)
}

/// Archives a web form submission and invites the submitter to the
/// event the form describes.
#[derive(Debug)]
pub struct SubmitFormUseCase {
    pub body: RequestBody,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingToken,
    InvalidToken,
    InvalidForm(FormNormalizationError),
    StorageError,
    Reconcile(ReconcileError),
}

impl From<UseCaseError> for InviteEngineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingToken => {
                Self::Unauthorized("The submission must include an access token".into())
            }
            UseCaseError::InvalidToken => {
                Self::Unauthorized("The access token is invalid, used or expired".into())
            }
            UseCaseError::InvalidForm(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::Reconcile(e) => e.into(),
        }
    }
}

impl SubmitFormUseCase {
    async fn consume_token(&self, ctx: &InviteContext) -> Result<(), UseCaseError> {
        let token = self.body.token().ok_or(UseCaseError::MissingToken)?;
        let token = ctx
            .repos
            .access_tokens
            .consume(token)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::InvalidToken)?;

        let now = ctx.sys.get_timestamp_millis();
        if token.is_expired(now, ctx.config.access_token_ttl_millis) {
            return Err(UseCaseError::InvalidToken);
        }
        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SubmitFormUseCase {
    type Response = ReconcileOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "SubmitForm";

    async fn execute(&mut self, ctx: &InviteContext) -> Result<Self::Response, Self::Error> {
        if ctx.config.require_access_token {
            self.consume_token(ctx).await?;
        }

        let payload =
            serde_json::to_value(&self.body).map_err(|_| UseCaseError::StorageError)?;
        let submission = FormSubmission::new(payload, ctx.sys.get_timestamp_millis());
        ctx.repos
            .form_submissions
            .insert(&submission)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        info!("Form submission archived with id: {}", submission.id);

        let fields = FormFields::new(self.body.data());
        let (event_details, recipient) =
            normalize_form_submission(&fields, &ctx.config.organizer)
                .map_err(UseCaseError::InvalidForm)?;

        let mut reconcile = ReconcileEventUseCase {
            event_details,
            recipient,
        };
        reconcile
            .execute(ctx)
            .await
            .map_err(UseCaseError::Reconcile)
    }
}
