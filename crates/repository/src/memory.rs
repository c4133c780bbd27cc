use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Entity, Identifier, Repository};

/// In-memory repository backed by a hash map.
///
/// Contents live for the lifetime of the process. Clones are handles to the
/// same map, so a cloned repository is the same store, not a copy.
pub struct InMemoryRepository<E: Entity> {
    entries: Arc<RwLock<HashMap<E::Id, E>>>,
}

impl<E: Entity> InMemoryRepository<E> {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of stored entities.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn find_by_id(&self, id: &E::Id) -> Option<E> {
        self.entries.read().await.get(id).cloned()
    }

    async fn find_all(&self) -> Vec<E> {
        let entries = self.entries.read().await;
        let mut all: Vec<E> = entries.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        all
    }

    async fn create(&self, draft: E::Draft) -> E {
        let id = E::Id::generate();
        let entity = E::from_draft(id.clone(), draft, common::clock::now());

        self.entries.write().await.insert(id, entity.clone());
        tracing::debug!(kind = E::KIND, id = %entity.id(), "entity stored");

        entity
    }

    async fn update(&self, id: &E::Id, changes: E::Changes) -> Option<E> {
        let mut entries = self.entries.write().await;
        let current = entries.get(id)?;
        let next = current.merge(changes);
        entries.insert(id.clone(), next.clone());
        tracing::debug!(kind = E::KIND, %id, "entity replaced");

        Some(next)
    }

    async fn delete(&self, id: &E::Id) -> bool {
        let removed = self.entries.write().await.remove(id).is_some();
        if removed {
            tracing::debug!(kind = E::KIND, %id, "entity removed");
        }
        removed
    }

    async fn exists(&self, id: &E::Id) -> bool {
        self.entries.read().await.contains_key(id)
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
