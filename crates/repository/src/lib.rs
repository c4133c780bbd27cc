//! Entity repository abstraction.
//!
//! - [`Entity`] describes an immutable record snapshot and how it is built and merged
//! - [`Repository`] is the async storage seam, generic over the entity kind
//! - [`RepositoryExt`] adds predicate scans to every repository
//! - [`InMemoryRepository`] is the map-backed implementation

pub mod entity;
pub mod memory;
pub mod store;

pub use common::EntityId;
pub use entity::{Entity, Identifier};
pub use memory::InMemoryRepository;
pub use store::{Repository, RepositoryExt};
