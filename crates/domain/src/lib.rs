mod date;
mod event;
mod form;
mod invite;
mod shared;
mod submission;

pub use date::{end_of_utc_day, format_datetime, is_same_utc_day, parse_datetime, start_of_utc_day};
pub use event::{
    EventDetails, EventKey, EventMerge, EventStatus, Organizer, Recipient, ScheduledEvent,
    SelectedUser, DEFAULT_EVENT_DESCRIPTION,
};
pub use form::{normalize_form_submission, FormFields, FormNormalizationError};
pub use invite::InviteLedgerEntry;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use submission::{AccessToken, FormSubmission};
