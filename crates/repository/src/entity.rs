use std::fmt::Display;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use common::EntityId;

/// Identifier type usable as a repository key.
pub trait Identifier: Clone + Eq + Ord + Hash + Display + Send + Sync + 'static {
    /// Generates a fresh identifier. Collisions are negligible, not checked.
    fn generate() -> Self;
}

impl Identifier for EntityId {
    fn generate() -> Self {
        EntityId::new()
    }
}

/// An immutable record snapshot that can be stored in a [`Repository`].
///
/// Snapshots are never mutated in place: a repository replaces the stored
/// value with the result of [`Entity::merge`].
///
/// [`Repository`]: crate::Repository
pub trait Entity: Clone + Send + Sync + 'static {
    /// Key type for this entity kind.
    type Id: Identifier;

    /// Validated, normalized field set for a new entity.
    type Draft: Send + 'static;

    /// Validated partial update. Absent fields keep their current value.
    type Changes: Send + 'static;

    /// Human-readable entity kind, used in logs and error messages.
    const KIND: &'static str;

    /// Returns the entity's identifier.
    fn id(&self) -> &Self::Id;

    /// When the entity was first stored.
    fn created_at(&self) -> DateTime<Utc>;

    /// When the entity was last replaced.
    fn updated_at(&self) -> DateTime<Utc>;

    /// Builds the first snapshot. `created_at` and `updated_at` are both `at`.
    fn from_draft(id: Self::Id, draft: Self::Draft, at: DateTime<Utc>) -> Self;

    /// Produces the next snapshot by applying `changes`.
    ///
    /// The returned snapshot's `updated_at` must be strictly greater than
    /// `self.updated_at()`.
    fn merge(&self, changes: Self::Changes) -> Self;
}
