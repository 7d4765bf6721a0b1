use super::{INotificationSender, InviteMessage, SendReceipt};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};
use tracing::info;

/// Keeps sent messages in memory. Used in tests and when no email
/// api is configured.
#[derive(Default)]
pub struct InMemoryMailer {
    sent: Mutex<Vec<InviteMessage>>,
    failing: AtomicBool,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Default::default()
    }

    /// Makes every following `send` fail until set back to false
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<InviteMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl INotificationSender for InMemoryMailer {
    async fn send(&self, message: &InviteMessage) -> anyhow::Result<SendReceipt> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow::Error::msg("Mail transport is unavailable"));
        }
        info!("Recorded invite email to: {}", message.to);
        self.sent.lock().unwrap().push(message.clone());
        Ok(SendReceipt {
            accepted: vec![message.to.clone()],
            message_id: None,
        })
    }
}
