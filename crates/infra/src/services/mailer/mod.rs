mod http;
mod inmemory;

pub use http::HttpMailer;
pub use inmemory::InMemoryMailer;

pub const INVITE_ATTACHMENT_FILENAME: &str = "invitation.ics";
pub const INVITE_ATTACHMENT_CONTENT_TYPE: &str = "text/calendar; method=REQUEST; charset=UTF-8";

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarAttachment {
    pub filename: String,
    pub content: String,
    pub content_type: String,
}

impl CalendarAttachment {
    pub fn invite(content: String) -> Self {
        Self {
            filename: INVITE_ATTACHMENT_FILENAME.into(),
            content,
            content_type: INVITE_ATTACHMENT_CONTENT_TYPE.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InviteMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
    pub attachment: CalendarAttachment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendReceipt {
    /// Addresses the mail transport accepted the message for
    pub accepted: Vec<String>,
    pub message_id: Option<String>,
}

/// Delivers invite emails. A call either fails or hands the message
/// over exactly once, it is never retried.
#[async_trait::async_trait]
pub trait INotificationSender: Send + Sync {
    async fn send(&self, message: &InviteMessage) -> anyhow::Result<SendReceipt>;
}
