//! Shared types used across the workspace.

pub mod clock;
pub mod error;
pub mod id;

pub use error::ErrorKind;
pub use id::EntityId;
