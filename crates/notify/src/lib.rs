//! Notification dispatch.
//!
//! A [`NotificationDispatcher`] holds an ordered list of [`Strategy`] values,
//! each pairing a [`Sender`] with the rule that selects it. Dispatch picks the
//! first strategy that accepts the address:
//! 1. email-shaped addresses contain `@`
//! 2. phone-shaped addresses are `+` and 10 to 15 digits
//! 3. device tokens start with `device_`
//!
//! Bulk dispatch runs every address concurrently and reports delivered and
//! failed addresses separately instead of failing as a whole.

pub mod channel;
pub mod dispatcher;
pub mod error;
pub mod senders;

pub use channel::{Channel, DEVICE_PREFIX};
pub use dispatcher::{BulkReport, Delivery, FailedDelivery, Matcher, NotificationDispatcher, Strategy};
pub use error::NotifyError;
pub use senders::{InMemorySender, Sender, SentMessage};
