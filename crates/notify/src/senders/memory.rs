//! In-memory senders that record what they deliver.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::channel::Channel;
use crate::error::NotifyError;

use super::Sender;

/// A message accepted by an [`InMemorySender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub address: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct OutboxState {
    sent: Vec<SentMessage>,
    fail_on_send: bool,
}

/// Sender that appends to an in-process outbox instead of delivering.
///
/// Clones share the same outbox, so a test can keep a handle after
/// registering the sender with a dispatcher.
#[derive(Debug, Clone)]
pub struct InMemorySender {
    name: String,
    channel: Channel,
    state: Arc<Mutex<OutboxState>>,
}

impl InMemorySender {
    /// Creates a sender for `channel`.
    pub fn new(name: impl Into<String>, channel: Channel) -> Self {
        Self {
            name: name.into(),
            channel,
            state: Arc::new(Mutex::new(OutboxState::default())),
        }
    }

    pub fn email() -> Self {
        Self::new("email", Channel::Email)
    }

    pub fn sms() -> Self {
        Self::new("sms", Channel::Sms)
    }

    pub fn push() -> Self {
        Self::new("push", Channel::Push)
    }

    /// Makes every following send fail until reset.
    pub async fn set_fail_on_send(&self, fail: bool) {
        self.state.lock().await.fail_on_send = fail;
    }

    /// Returns every message accepted so far, oldest first.
    pub async fn sent(&self) -> Vec<SentMessage> {
        self.state.lock().await.sent.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.state.lock().await.sent.len()
    }
}

#[async_trait]
impl Sender for InMemorySender {
    fn name(&self) -> &str {
        &self.name
    }

    fn channel(&self) -> Channel {
        self.channel
    }

    async fn send(&self, message: &str, address: &str) -> Result<bool, NotifyError> {
        let mut state = self.state.lock().await;

        if state.fail_on_send {
            return Err(NotifyError::SendFailed {
                sender: self.name.clone(),
                reason: format!("{} gateway unavailable", self.channel),
            });
        }

        state.sent.push(SentMessage {
            address: address.to_string(),
            message: message.to_string(),
            sent_at: Utc::now(),
        });
        tracing::debug!(sender = %self.name, %address, "message recorded");

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_records_message() {
        let sender = InMemorySender::email();
        let delivered = sender.send("hello", "a@b.com").await.unwrap();

        assert!(delivered);
        let sent = sender.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].address, "a@b.com");
        assert_eq!(sent[0].message, "hello");
    }

    #[tokio::test]
    async fn test_fail_on_send() {
        let sender = InMemorySender::sms();
        sender.set_fail_on_send(true).await;

        let err = sender.send("hello", "+12345678901").await.unwrap_err();
        assert!(matches!(err, NotifyError::SendFailed { sender: ref name, .. } if name == "sms"));
        assert_eq!(sender.sent_count().await, 0);

        sender.set_fail_on_send(false).await;
        assert!(sender.send("hello", "+12345678901").await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_outbox() {
        let sender = InMemorySender::push();
        let handle = sender.clone();

        sender.send("ping", "device_1").await.unwrap();
        assert_eq!(handle.sent_count().await, 1);
    }

    #[test]
    fn test_default_shapes() {
        assert!(InMemorySender::email().can_handle("a@b.com"));
        assert!(InMemorySender::sms().can_handle("+12345678901"));
        assert!(InMemorySender::push().can_handle("device_1"));
        assert!(!InMemorySender::push().can_handle("a@b.com"));
    }
}
