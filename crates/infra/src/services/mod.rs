mod ics;
mod mailer;

pub use ics::{IInvitePayloadBuilder, IcsInviteBuilder};
pub use mailer::{
    CalendarAttachment, HttpMailer, INotificationSender, InMemoryMailer, InviteMessage,
    SendReceipt, INVITE_ATTACHMENT_CONTENT_TYPE, INVITE_ATTACHMENT_FILENAME,
};
