//! In-memory implementation of CollectionService for testing and development

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

use crate::core::entity::{Entity, EntityId};
use crate::source::service::{BulkFailure, BulkOutcome, CollectionService};

/// In-memory collection service
///
/// Useful for testing and development. Entities keep insertion order, so an
/// unsorted view paginates deterministically. Uses RwLock for thread-safe
/// access.
#[derive(Clone)]
pub struct InMemoryCollectionService<T: Entity> {
    items: Arc<RwLock<IndexMap<EntityId, T>>>,
}

impl<T: Entity> InMemoryCollectionService<T> {
    /// Create an empty in-memory collection
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Create a collection pre-populated with entities
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut map = IndexMap::new();
        for item in items {
            map.insert(item.id(), item);
        }
        Self {
            items: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace a single entity
    pub fn insert(&self, item: T) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        items.insert(item.id(), item);
        Ok(())
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Entity> Default for InMemoryCollectionService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> CollectionService<T> for InMemoryCollectionService<T> {
    async fn fetch_all(&self) -> Result<Vec<T>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.values().cloned().collect())
    }

    async fn delete(&self, id: &EntityId) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        items.shift_remove(id);

        Ok(())
    }

    async fn delete_many(&self, ids: &[EntityId]) -> Result<BulkOutcome> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let mut outcome = BulkOutcome::default();
        for id in ids {
            if items.shift_remove(id).is_some() {
                outcome.successful.push(id.clone());
            } else {
                outcome.failed.push(BulkFailure {
                    id: id.clone(),
                    reason: format!("{} with id '{}' not found", T::entity_type(), id),
                });
            }
        }
        Ok(outcome)
    }
}
