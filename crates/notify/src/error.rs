//! Notification error types.

use common::ErrorKind;
use thiserror::Error;

/// Errors that can occur while dispatching a notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// No registered sender accepts the address.
    #[error("No sender available for address: {address}")]
    NoSender { address: String },

    /// The selected sender tried and failed.
    #[error("Sender '{sender}' failed: {reason}")]
    SendFailed { sender: String, reason: String },
}

impl NotifyError {
    /// Classifies the error for the transport layer.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NotifyError::NoSender { .. } => ErrorKind::NoSender,
            NotifyError::SendFailed { .. } => ErrorKind::Internal,
        }
    }
}

/// Convenience type alias for notification results.
pub type Result<T> = std::result::Result<T, NotifyError>;
