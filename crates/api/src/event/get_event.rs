use crate::{
    error::InviteEngineError,
    shared::{
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use invite_engine_api_structs::get_event::*;
use invite_engine_domain::{InviteLedgerEntry, ScheduledEvent, ID};
use invite_engine_infra::InviteContext;

pub async fn get_event_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<InviteContext>,
) -> Result<HttpResponse, InviteEngineError> {
    let event_id = Guard::against_malformed_id(&path_params.event_id)?;
    let usecase = GetEventUseCase { event_id };

    execute(usecase, &ctx)
        .await
        .map(|(event, invites)| HttpResponse::Ok().json(APIResponse::new(event, invites)))
        .map_err(InviteEngineError::from)
}

/// Loads an event together with the invites sent for it
#[derive(Debug)]
pub struct GetEventUseCase {
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for InviteEngineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The scheduled event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventUseCase {
    type Response = (ScheduledEvent, Vec<InviteLedgerEntry>);

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvent";

    async fn execute(&mut self, ctx: &InviteContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.events.find(&self.event_id).await {
            Ok(Some(event)) => event,
            Ok(None) => return Err(UseCaseError::NotFound(self.event_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        let invites = ctx
            .repos
            .invites_sent
            .find_by_event(&event.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok((event, invites))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use invite_engine_domain::{EventDetails, Organizer};

    #[actix_web::main]
    #[test]
    async fn returns_event_with_its_invites() {
        let ctx = InviteContext::create_inmemory();
        let details = EventDetails {
            summary: "Workshop".into(),
            location: "Library".into(),
            description: "".into(),
            organizer: Organizer {
                name: "Org".into(),
                email: "org@example.com".into(),
            },
            start_ts: 0,
            end_ts: 0,
        };
        let event = ScheduledEvent::new_full_day(details, vec![], 0);
        ctx.repos.events.insert(&event).await.unwrap();
        let invite = InviteLedgerEntry {
            id: Default::default(),
            event_id: event.id.clone(),
            to: "ada@example.com".into(),
            name: "Ada".into(),
            summary: "Workshop".into(),
            location: "Library".into(),
            sent_at: 0,
            organizer: "org@example.com".into(),
            source: "microservice".into(),
        };
        ctx.repos.invites_sent.insert(&invite).await.unwrap();

        let mut usecase = GetEventUseCase {
            event_id: event.id.clone(),
        };
        let res = usecase.execute(&ctx).await;
        assert_eq!(res, Ok((event, vec![invite])));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_event() {
        let ctx = InviteContext::create_inmemory();
        let event_id = ID::default();

        let mut usecase = GetEventUseCase {
            event_id: event_id.clone(),
        };
        let res = usecase.execute(&ctx).await;
        assert_eq!(res, Err(UseCaseError::NotFound(event_id)));
    }
}
