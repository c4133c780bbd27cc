//! Subscriber trait and built-in handlers.

use std::future::Future;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::event::DomainEvent;

/// A subscriber that reacts to published events.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Returns the handler's name, used in logs.
    fn name(&self) -> &str;

    /// Handles a single event.
    async fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError>;
}

/// Handler backed by an async closure. Built with [`handler_fn`].
pub struct FnHandler<F> {
    name: String,
    func: F,
}

/// Wraps an async closure as an [`EventHandler`].
///
/// The closure receives its own copy of the event.
pub fn handler_fn<F, Fut>(name: impl Into<String>, func: F) -> FnHandler<F>
where
    F: Fn(DomainEvent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    FnHandler {
        name: name.into(),
        func,
    }
}

#[async_trait]
impl<F, Fut> EventHandler for FnHandler<F>
where
    F: Fn(DomainEvent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        (self.func)(event.clone()).await
    }
}

/// Writes every event it receives to the log.
#[derive(Debug, Clone, Default)]
pub struct LoggingHandler;

impl LoggingHandler {
    /// Creates a new logging handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler for LoggingHandler {
    fn name(&self) -> &str {
        "logger"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        tracing::info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            aggregate_type = %event.aggregate_type,
            aggregate_id = %event.aggregate_id,
            "domain event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn sample_event() -> DomainEvent {
        DomainEvent::builder()
            .event_type("user.created")
            .aggregate_type("User")
            .aggregate_id("u1")
            .payload_raw(serde_json::json!({}))
            .try_build()
            .unwrap()
    }

    #[tokio::test]
    async fn fn_handler_invokes_closure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let handler = handler_fn("counter", move |event: DomainEvent| {
            let seen = seen.clone();
            async move {
                assert_eq!(event.aggregate_id, "u1");
                seen.fetch_add(1, Ordering::SeqCst);
                Ok::<(), HandlerError>(())
            }
        });

        handler.handle(&sample_event()).await.unwrap();
        handler.handle(&sample_event()).await.unwrap();

        assert_eq!(handler.name(), "counter");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fn_handler_propagates_error() {
        let handler = handler_fn("broken", |_event: DomainEvent| async {
            Err::<(), _>(HandlerError::failed("boom"))
        });

        let err = handler.handle(&sample_event()).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn logging_handler_always_succeeds() {
        let handler = LoggingHandler::new();
        assert!(handler.handle(&sample_event()).await.is_ok());
        assert_eq!(handler.name(), "logger");
    }
}
