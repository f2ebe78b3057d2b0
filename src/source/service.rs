//! Service trait for remote entity collections

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;

/// The outcome of a bulk operation
///
/// Partial failure is a value, not an exception: when the backend reports
/// that some identifiers succeeded and others did not (a foreign-key
/// constraint blocking one delete, say), both lists come back and the caller
/// decides what to do with each.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkOutcome {
    /// Identifiers the backend processed successfully
    pub successful: Vec<EntityId>,

    /// Identifiers that failed, each with the backend's reason
    pub failed: Vec<BulkFailure>,
}

/// One failed item of a bulk operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: EntityId,
    pub reason: String,
}

impl BulkOutcome {
    /// An outcome where every id succeeded
    pub fn all_successful(ids: impl IntoIterator<Item = EntityId>) -> Self {
        Self {
            successful: ids.into_iter().collect(),
            failed: Vec::new(),
        }
    }

    /// Whether no item failed
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of items the outcome covers
    pub fn len(&self) -> usize {
        self.successful.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.successful.is_empty() && self.failed.is_empty()
    }

    /// Fold another outcome into this one
    pub fn merge(&mut self, other: BulkOutcome) {
        self.successful.extend(other.successful);
        self.failed.extend(other.failed);
    }
}

/// Service trait for a remote entity collection
///
/// Implementations wrap whatever the backend is — an HTTP API, an in-memory
/// map in tests. The pipeline is agnostic: it fetches the complete collection
/// and does its own filtering, sorting and pagination client-side.
///
/// Errors cross this boundary as [`ServiceError`](crate::core::error::ServiceError)
/// values inside `anyhow::Error`, so callers can downcast for the status code
/// and message.
#[async_trait]
pub trait CollectionService<T>: Send + Sync {
    /// Fetch the full collection
    async fn fetch_all(&self) -> Result<Vec<T>>;

    /// Delete a single entity
    async fn delete(&self, id: &EntityId) -> Result<()>;

    /// Delete a batch of entities, reporting per-item success and failure
    async fn delete_many(&self, ids: &[EntityId]) -> Result<BulkOutcome>;
}
