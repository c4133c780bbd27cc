use async_trait::async_trait;

use crate::Entity;

/// Core trait for entity repositories.
///
/// A repository exclusively owns the stored snapshots for one entity kind.
/// Absence is never an error: lookups return `None` and mutations report
/// whether anything was touched. Callers decide what absence means.
///
/// Kind-specific queries (lookup by email, by category) are not part of this
/// trait; they live on capability traits layered on top of it.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Looks up an entity by identifier.
    async fn find_by_id(&self, id: &E::Id) -> Option<E>;

    /// Returns a snapshot copy of every stored entity, oldest first.
    async fn find_all(&self) -> Vec<E>;

    /// Stores a new entity under a freshly generated identifier.
    async fn create(&self, draft: E::Draft) -> E;

    /// Replaces the entity with `changes` applied.
    ///
    /// Returns `None` if the identifier is unknown.
    async fn update(&self, id: &E::Id, changes: E::Changes) -> Option<E>;

    /// Removes an entity. Returns true iff an entry was removed.
    async fn delete(&self, id: &E::Id) -> bool;

    /// Returns true if an entity with this identifier is stored.
    async fn exists(&self, id: &E::Id) -> bool;

    /// Removes every entity.
    async fn clear(&self);
}

/// Extension trait providing convenience scans for repositories.
#[async_trait]
pub trait RepositoryExt<E: Entity>: Repository<E> {
    /// Returns every entity matching `predicate`, in `find_all` order.
    async fn find_where(&self, predicate: &(dyn for<'a> Fn(&'a E) -> bool + Send + Sync)) -> Vec<E> {
        self.find_all()
            .await
            .into_iter()
            .filter(|entity| predicate(entity))
            .collect()
    }

    /// Returns the first entity matching `predicate`.
    async fn find_first(
        &self,
        predicate: &(dyn for<'a> Fn(&'a E) -> bool + Send + Sync),
    ) -> Option<E> {
        self.find_all()
            .await
            .into_iter()
            .find(|entity| predicate(entity))
    }

    /// Returns the number of stored entities.
    async fn count(&self) -> usize {
        self.find_all().await.len()
    }
}

// Blanket implementation for all Repository implementations
impl<E: Entity, T: Repository<E> + ?Sized> RepositoryExt<E> for T {}
