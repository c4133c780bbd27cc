//! Sender trait and in-memory implementations.

pub mod memory;

use async_trait::async_trait;

use crate::channel::Channel;
use crate::error::NotifyError;

pub use memory::{InMemorySender, SentMessage};

/// A notification strategy that delivers messages over one channel.
#[async_trait]
pub trait Sender: Send + Sync {
    /// Returns the sender's name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Returns the channel this sender delivers over.
    fn channel(&self) -> Channel;

    /// Returns true if this sender can deliver to `address`.
    fn can_handle(&self, address: &str) -> bool {
        self.channel().accepts(address)
    }

    /// Delivers `message` to `address`.
    ///
    /// `Ok(false)` means the sender ran but the message was not accepted
    /// downstream; `Err` means the sender itself failed.
    async fn send(&self, message: &str, address: &str) -> Result<bool, NotifyError>;
}
