//! In-process publisher fanning events out to subscribers.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::join_all;
use tokio::sync::RwLock;

use crate::event::DomainEvent;
use crate::handler::EventHandler;

/// Outcome of delivering one event to its subscribers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Handlers that completed successfully.
    pub delivered: usize,
    /// Handlers that returned an error or panicked.
    pub failed: usize,
}

impl PublishReport {
    /// Total number of handlers the event was offered to.
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Routes events to handlers registered for their kind.
///
/// One publisher is created per process and handed to every service that
/// emits events. Handlers for the same event run concurrently; `publish`
/// returns once all of them have settled. A failing or panicking handler is
/// logged and counted but is invisible to the publisher's caller and to the
/// other handlers.
#[derive(Default)]
pub struct EventPublisher {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
}

impl EventPublisher {
    /// Creates a publisher with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events of `event_type`.
    ///
    /// The same handler may be registered for several kinds.
    pub async fn subscribe(&self, event_type: impl Into<String>, handler: Arc<dyn EventHandler>) {
        let event_type = event_type.into();
        tracing::debug!(%event_type, handler = handler.name(), "subscribed");
        self.handlers
            .write()
            .await
            .entry(event_type)
            .or_default()
            .push(handler);
    }

    /// Removes `handler` from the subscribers of `event_type`.
    ///
    /// Handlers are compared by identity. Removing a handler that is not
    /// registered does nothing. Returns true if a registration was removed.
    pub async fn unsubscribe(&self, event_type: &str, handler: &Arc<dyn EventHandler>) -> bool {
        let mut handlers = self.handlers.write().await;
        let Some(registered) = handlers.get_mut(event_type) else {
            return false;
        };

        let Some(position) = registered.iter().position(|h| Arc::ptr_eq(h, handler)) else {
            return false;
        };
        registered.remove(position);
        if registered.is_empty() {
            handlers.remove(event_type);
        }

        tracing::debug!(%event_type, handler = handler.name(), "unsubscribed");
        true
    }

    /// Returns how many handlers are registered for `event_type`.
    pub async fn subscriber_count(&self, event_type: &str) -> usize {
        self.handlers
            .read()
            .await
            .get(event_type)
            .map_or(0, Vec::len)
    }

    /// Delivers `event` to every handler registered for its kind.
    #[tracing::instrument(skip(self, event), fields(event_type = %event.event_type, aggregate_id = %event.aggregate_id))]
    pub async fn publish(&self, event: DomainEvent) -> PublishReport {
        // Snapshot the list so handlers may (un)subscribe while running.
        let handlers = self
            .handlers
            .read()
            .await
            .get(&event.event_type)
            .cloned()
            .unwrap_or_default();

        metrics::counter!("events_published_total", "event_type" => event.event_type.clone())
            .increment(1);

        if handlers.is_empty() {
            tracing::debug!("no subscribers");
            return PublishReport::default();
        }

        let event = &event;
        let outcomes = join_all(handlers.iter().map(|handler| async move {
            let outcome = AssertUnwindSafe(handler.handle(event)).catch_unwind().await;
            (handler.name(), outcome)
        }))
        .await;

        let mut report = PublishReport::default();
        for (name, outcome) in outcomes {
            match outcome {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(err)) => {
                    report.failed += 1;
                    metrics::counter!("event_handler_failures_total").increment(1);
                    tracing::warn!(handler = name, error = %err, "event handler failed");
                }
                Err(_) => {
                    report.failed += 1;
                    metrics::counter!("event_handler_failures_total").increment(1);
                    tracing::warn!(handler = name, "event handler panicked");
                }
            }
        }

        report
    }
}
