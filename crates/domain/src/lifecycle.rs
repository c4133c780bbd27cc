//! Lifecycle events emitted by the services.

use chrono::{DateTime, Utc};
use events::{DomainEvent, EventId, EventPublisher};
use serde::Serialize;

use crate::error::DomainError;

/// Kinds of event the services publish, one per successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    UserCreated,
    UserUpdated,
    UserDeleted,
    ProductCreated,
    ProductUpdated,
    ProductDeleted,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 6] = [
        EventKind::UserCreated,
        EventKind::UserUpdated,
        EventKind::UserDeleted,
        EventKind::ProductCreated,
        EventKind::ProductUpdated,
        EventKind::ProductDeleted,
    ];

    /// Routing key used with the publisher.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::UserCreated => "user.created",
            EventKind::UserUpdated => "user.updated",
            EventKind::UserDeleted => "user.deleted",
            EventKind::ProductCreated => "product.created",
            EventKind::ProductUpdated => "product.updated",
            EventKind::ProductDeleted => "product.deleted",
        }
    }

    /// Entity kind the event is about.
    pub fn aggregate_type(&self) -> &'static str {
        match self {
            EventKind::UserCreated | EventKind::UserUpdated | EventKind::UserDeleted => "User",
            EventKind::ProductCreated | EventKind::ProductUpdated | EventKind::ProductDeleted => {
                "Product"
            }
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the event for `snapshot` and waits for every subscriber to settle.
pub(crate) async fn emit<T: Serialize>(
    publisher: &EventPublisher,
    kind: EventKind,
    aggregate_id: impl ToString,
    snapshot: &T,
    occurred_at: DateTime<Utc>,
) -> Result<(), DomainError> {
    let event = DomainEvent {
        event_id: EventId::new(),
        event_type: kind.as_str().to_string(),
        aggregate_type: kind.aggregate_type().to_string(),
        aggregate_id: aggregate_id.to_string(),
        occurred_at,
        payload: serde_json::to_value(snapshot)?,
    };

    publisher.publish(event).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_keys_are_unique() {
        let mut keys: Vec<&str> = EventKind::ALL.iter().map(EventKind::as_str).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), EventKind::ALL.len());
    }

    #[test]
    fn aggregate_types_follow_prefix() {
        for kind in EventKind::ALL {
            let prefix = kind.as_str().split('.').next().unwrap();
            assert_eq!(kind.aggregate_type().to_lowercase(), prefix);
        }
    }
}
