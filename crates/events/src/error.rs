//! Event handler error types.

use thiserror::Error;

/// Errors a subscriber can report while handling an event.
///
/// The publisher logs these and moves on; they never reach the code that
/// published the event.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler could not do its job.
    #[error("Handler failed: {0}")]
    Failed(String),

    /// The event payload did not match the shape the handler expects.
    #[error("Payload deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl HandlerError {
    /// Creates a generic failure.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}
