use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable notification that a mutation has completed.
///
/// The payload is the affected entity snapshot rendered as JSON. Events are
/// broadcast once and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// Event kind used for subscriber routing (e.g. `"user.created"`).
    pub event_type: String,

    /// Kind of entity the event is about (e.g. `"User"`).
    pub aggregate_type: String,

    /// Identifier of the affected entity.
    pub aggregate_id: String,

    /// When the mutation happened.
    pub occurred_at: DateTime<Utc>,

    /// Snapshot of the affected entity.
    pub payload: serde_json::Value,
}

impl DomainEvent {
    /// Creates a new event builder.
    pub fn builder() -> DomainEventBuilder {
        DomainEventBuilder::default()
    }

    /// Deserializes the payload into a concrete snapshot type.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

/// Builder for constructing domain events.
#[derive(Debug, Default)]
pub struct DomainEventBuilder {
    event_id: Option<EventId>,
    event_type: Option<String>,
    aggregate_type: Option<String>,
    aggregate_id: Option<String>,
    occurred_at: Option<DateTime<Utc>>,
    payload: Option<serde_json::Value>,
}

impl DomainEventBuilder {
    /// Sets the event ID. If not set, a new ID will be generated.
    pub fn event_id(mut self, id: EventId) -> Self {
        self.event_id = Some(id);
        self
    }

    /// Sets the event kind.
    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// Sets the aggregate type.
    pub fn aggregate_type(mut self, aggregate_type: impl Into<String>) -> Self {
        self.aggregate_type = Some(aggregate_type.into());
        self
    }

    /// Sets the aggregate ID.
    pub fn aggregate_id(mut self, id: impl ToString) -> Self {
        self.aggregate_id = Some(id.to_string());
        self
    }

    /// Sets the occurrence time. If not set, the current time will be used.
    pub fn occurred_at(mut self, at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(at);
        self
    }

    /// Sets the payload from a serializable value.
    pub fn payload<T: Serialize>(mut self, payload: &T) -> Result<Self, serde_json::Error> {
        self.payload = Some(serde_json::to_value(payload)?);
        Ok(self)
    }

    /// Sets the payload from a raw JSON value.
    pub fn payload_raw(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Builds the event, returning None if event type, aggregate type,
    /// aggregate ID or payload is missing.
    pub fn try_build(self) -> Option<DomainEvent> {
        Some(DomainEvent {
            event_id: self.event_id.unwrap_or_default(),
            event_type: self.event_type?,
            aggregate_type: self.aggregate_type?,
            aggregate_id: self.aggregate_id?,
            occurred_at: self.occurred_at.unwrap_or_else(Utc::now),
            payload: self.payload?,
        })
    }
}
