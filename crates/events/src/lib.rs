//! In-process domain event broadcasting.
//!
//! This crate provides the notification side channel of the record service:
//! - [`DomainEvent`] envelope carrying the affected entity snapshot
//! - [`EventHandler`] trait for subscribers, plus [`handler_fn`] and [`LoggingHandler`]
//! - [`EventPublisher`] mapping event kinds to subscribers and fanning out concurrently
//!
//! Events are not stored and not retried. Delivery ends when `publish` returns.

pub mod error;
pub mod event;
pub mod handler;
pub mod publisher;

pub use error::HandlerError;
pub use event::{DomainEvent, DomainEventBuilder, EventId};
pub use handler::{EventHandler, FnHandler, LoggingHandler, handler_fn};
pub use publisher::{EventPublisher, PublishReport};
