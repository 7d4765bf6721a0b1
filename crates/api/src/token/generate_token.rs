use crate::error::InviteEngineError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use invite_engine_api_structs::generate_token::APIResponse;
use invite_engine_domain::AccessToken;
use invite_engine_infra::InviteContext;

pub async fn generate_token_controller(
    ctx: web::Data<InviteContext>,
) -> Result<HttpResponse, InviteEngineError> {
    execute(GenerateTokenUseCase {}, &ctx)
        .await
        .map(|token| HttpResponse::Ok().json(APIResponse::new(token)))
        .map_err(InviteEngineError::from)
}

/// Issues a single use token a form page includes in its submission
#[derive(Debug)]
pub struct GenerateTokenUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for InviteEngineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GenerateTokenUseCase {
    type Response = AccessToken;

    type Error = UseCaseError;

    const NAME: &'static str = "GenerateToken";

    async fn execute(&mut self, ctx: &InviteContext) -> Result<Self::Response, Self::Error> {
        let token = AccessToken::new(ctx.sys.get_timestamp_millis());
        ctx.repos
            .access_tokens
            .insert(&token)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(token)
    }
}
