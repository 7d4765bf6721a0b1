use crate::error::InviteEngineError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use invite_engine_api_structs::dtos::{ReconcileOutcomeDTO, SkipReasonDTO};
use invite_engine_api_structs::reconcile_event::*;
use invite_engine_api_structs::ReconcileResponse;
use invite_engine_domain::{
    format_datetime, EventDetails, EventKey, EventMerge, EventStatus, InviteLedgerEntry,
    Recipient, ScheduledEvent, SelectedUser, DEFAULT_EVENT_DESCRIPTION, ID,
};
use invite_engine_infra::{
    CalendarAttachment, EventKeyQuery, InviteContext, InviteMessage, RecentInviteQuery,
};
use tracing::{error, info, warn};

const FALLBACK_SUBJECT: &str = "Event Invitation you asked for";

pub async fn reconcile_event_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<InviteContext>,
) -> Result<HttpResponse, InviteEngineError> {
    let body = body.0;
    let details = body.event_details;
    let usecase = ReconcileEventUseCase {
        event_details: EventDetails {
            summary: details.summary,
            location: details.location,
            description: details
                .description
                .filter(|description| !description.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EVENT_DESCRIPTION.into()),
            organizer: details.organizer,
            start_ts: details.start_ts,
            end_ts: details.end_ts,
        },
        recipient: body.selected_user,
    };

    execute(usecase, &ctx)
        .await
        .map(reconcile_response)
        .map_err(InviteEngineError::from)
}

/// Maps an outcome to the response shared by every route that reconciles
pub fn reconcile_response(outcome: ReconcileOutcome) -> HttpResponse {
    let (outcome_dto, skip_reason) = match &outcome {
        ReconcileOutcome::Created { .. } => (ReconcileOutcomeDTO::Created, None),
        ReconcileOutcome::Updated { .. } => (ReconcileOutcomeDTO::Updated, None),
        ReconcileOutcome::Skipped { reason, .. } => {
            (ReconcileOutcomeDTO::Skipped, Some(reason.into()))
        }
    };
    let body = ReconcileResponse {
        success: true,
        event_id: Some(outcome.event_id().clone()),
        outcome: outcome_dto,
        skip_reason,
        message: outcome.message().into(),
    };
    match outcome {
        ReconcileOutcome::Created { .. } => HttpResponse::Created().json(body),
        _ => HttpResponse::Ok().json(body),
    }
}

/// Finds or creates the event a submission describes on its UTC day and
/// invites the recipient to it, unless they were invited recently.
#[derive(Debug)]
pub struct ReconcileEventUseCase {
    pub event_details: EventDetails,
    pub recipient: Recipient,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// The event lists the recipient as invited within the recipient cooldown
    RecentDuplicate,
    /// The invite ledger has a recent invite for this recipient and event
    LedgerDuplicate,
}

impl From<&SkipReason> for SkipReasonDTO {
    fn from(reason: &SkipReason) -> Self {
        match reason {
            SkipReason::RecentDuplicate => Self::RecentDuplicate,
            SkipReason::LedgerDuplicate => Self::LedgerDuplicate,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// `invited` is false when the invite ledger suppressed the send
    Created { event_id: ID, invited: bool },
    Updated { event_id: ID },
    Skipped { event_id: ID, reason: SkipReason },
}

impl ReconcileOutcome {
    pub fn event_id(&self) -> &ID {
        match self {
            Self::Created { event_id, .. } => event_id,
            Self::Updated { event_id } => event_id,
            Self::Skipped { event_id, .. } => event_id,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Created { invited: true, .. } | Self::Updated { .. } => {
                "Event scheduled and invitation sent."
            }
            Self::Created { invited: false, .. } => {
                "New event created, but the invite was already sent recently. Skipping user insert."
            }
            Self::Skipped {
                reason: SkipReason::RecentDuplicate,
                ..
            } => "Invite already sent recently, skipping.",
            Self::Skipped {
                reason: SkipReason::LedgerDuplicate,
                ..
            } => "Duplicate invite detected, skipping email and user update.",
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidInput(String),
    StorageError,
    SendError(String),
}

impl From<UseCaseError> for InviteEngineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidInput(reason) => Self::BadClientData(reason),
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::SendError(reason) => Self::DeliveryFailed(reason),
        }
    }
}

impl ReconcileEventUseCase {
    fn validate(&mut self) -> Result<(), UseCaseError> {
        self.recipient.email = self.recipient.email.trim().to_string();
        self.event_details.organizer.email = self.event_details.organizer.email.trim().to_string();

        if self.recipient.email.is_empty() {
            return Err(UseCaseError::InvalidInput(
                "The selected user must have an email".into(),
            ));
        }
        if self.event_details.organizer.email.is_empty() {
            return Err(UseCaseError::InvalidInput(
                "The event organizer must have an email".into(),
            ));
        }
        Ok(())
    }

    async fn find_event_on_same_day(
        &self,
        key: &EventKey,
        ctx: &InviteContext,
    ) -> Result<Option<ScheduledEvent>, UseCaseError> {
        let candidates = ctx
            .repos
            .events
            .find_by_key(&EventKeyQuery::from(key))
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        // More than one match means an earlier race, the first one wins
        Ok(candidates.into_iter().find(|event| key.matches(event)))
    }

    async fn has_recent_ledger_entry(
        &self,
        now: i64,
        ctx: &InviteContext,
    ) -> Result<bool, UseCaseError> {
        let query = RecentInviteQuery {
            to: self.recipient.email.clone(),
            summary: self.event_details.summary.clone(),
            location: self.event_details.location.clone(),
            sent_after: now - ctx.config.ledger_cooldown_millis,
        };
        ctx.repos
            .invites_sent
            .find_recent(&query)
            .await
            .map(|entry| entry.is_some())
            .map_err(|_| UseCaseError::StorageError)
    }

    async fn create_event(
        &self,
        selected_users: Vec<SelectedUser>,
        now: i64,
        ctx: &InviteContext,
    ) -> Result<ScheduledEvent, UseCaseError> {
        let event = ScheduledEvent::new_full_day(self.event_details.clone(), selected_users, now);
        ctx.repos
            .events
            .insert(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok(event)
    }

    async fn merge_into(
        &self,
        event: &ScheduledEvent,
        now: i64,
        ctx: &InviteContext,
    ) -> Result<ScheduledEvent, UseCaseError> {
        let merge = EventMerge {
            end_ts: self.event_details.end_ts,
            description: self.event_details.description.clone(),
            location: self.event_details.location.clone(),
            organizer: self.event_details.organizer.clone(),
            selected_user: SelectedUser::invited(&self.recipient, now),
            scheduled_time: now,
            status: EventStatus::Pending,
        };
        ctx.repos
            .events
            .merge(&event.id, &merge)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        match ctx.repos.events.find(&event.id).await {
            Ok(Some(event)) => Ok(event),
            _ => Err(UseCaseError::StorageError),
        }
    }

    fn invite_message(&self, event: &ScheduledEvent, now: i64, ctx: &InviteContext) -> InviteMessage {
        let details = &event.event_details;
        let payload = ctx.invite_builder.build(details, &self.recipient, now);
        let scheduled_time = format_datetime(event.scheduled_time);
        let subject = if details.summary.trim().is_empty() {
            FALLBACK_SUBJECT.to_string()
        } else {
            details.summary.clone()
        };

        InviteMessage {
            from: ctx.config.sender_mailbox(),
            to: self.recipient.email.clone(),
            subject,
            text: format!(
                "You are invited to {} scheduled on {}. Please find the calendar event attached.",
                details.summary, scheduled_time
            ),
            html: format!(
                "<p>You are invited to {} scheduled on {}. Please find the calendar event attached.</p>",
                details.summary, scheduled_time
            ),
            attachment: CalendarAttachment::invite(payload),
        }
    }

    async fn send_invite(
        &self,
        event: &ScheduledEvent,
        now: i64,
        ctx: &InviteContext,
    ) -> Result<(), UseCaseError> {
        let message = self.invite_message(event, now, ctx);
        let receipt = match ctx.mailer.send(&message).await {
            Ok(receipt) => receipt,
            Err(e) => {
                // The event already lists the recipient as invited
                error!(
                    "Invite email to: {} for event: {} failed after the event was updated. Error: {:?}",
                    self.recipient.email, event.id, e
                );
                return Err(UseCaseError::SendError(format!(
                    "Unable to send the invite to {} for event {}",
                    self.recipient.email, event.id
                )));
            }
        };
        info!(
            "Invite sent: {:?} with message id: {:?}",
            receipt.accepted, receipt.message_id
        );

        let entry = InviteLedgerEntry {
            id: Default::default(),
            event_id: event.id.clone(),
            to: self.recipient.email.clone(),
            name: self.recipient.name.clone(),
            summary: self.event_details.summary.clone(),
            location: self.event_details.location.clone(),
            sent_at: ctx.sys.get_timestamp_millis(),
            organizer: self.event_details.organizer.email.clone(),
            source: ctx.config.ledger_source.clone(),
        };
        ctx.repos
            .invites_sent
            .insert(&entry)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ReconcileEventUseCase {
    type Response = ReconcileOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "ReconcileEvent";

    async fn execute(&mut self, ctx: &InviteContext) -> Result<Self::Response, Self::Error> {
        self.validate()?;

        let key = EventKey::new(&self.event_details);
        let _guard = if ctx.config.serialize_by_event_key {
            Some(ctx.event_locks.lock(&key).await)
        } else {
            None
        };
        let now = ctx.sys.get_timestamp_millis();

        let existing = self.find_event_on_same_day(&key, ctx).await?;

        if let Some(event) = &existing {
            if event.was_recently_invited(
                &self.recipient.email,
                now,
                ctx.config.recipient_cooldown_millis,
            ) {
                warn!(
                    "Skipping re-invite: Recently sent to: {}",
                    self.recipient.email
                );
                return Ok(ReconcileOutcome::Skipped {
                    event_id: event.id.clone(),
                    reason: SkipReason::RecentDuplicate,
                });
            }
        }

        if self.has_recent_ledger_entry(now, ctx).await? {
            warn!(
                "Invite already sent recently to: {} according to the invite ledger",
                self.recipient.email
            );
            return match existing {
                Some(event) => Ok(ReconcileOutcome::Skipped {
                    event_id: event.id,
                    reason: SkipReason::LedgerDuplicate,
                }),
                None => {
                    let event = self.create_event(Vec::new(), now, ctx).await?;
                    Ok(ReconcileOutcome::Created {
                        event_id: event.id,
                        invited: false,
                    })
                }
            };
        }

        let outcome = match existing {
            Some(event) => {
                let event = self.merge_into(&event, now, ctx).await?;
                self.send_invite(&event, now, ctx).await?;
                ReconcileOutcome::Updated { event_id: event.id }
            }
            None => {
                let user = SelectedUser::invited(&self.recipient, now);
                let event = self.create_event(vec![user], now, ctx).await?;
                self.send_invite(&event, now, ctx).await?;
                ReconcileOutcome::Created {
                    event_id: event.id,
                    invited: true,
                }
            }
        };

        Ok(outcome)
    }
}
