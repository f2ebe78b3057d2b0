//! Bulk action dispatcher
//!
//! Runs a caller-supplied action (delete, activate, export, ...) over the
//! resolved set of selected entities and reports per-item success and
//! failure. Partial failure is the normal case here, not an exception: a
//! foreign-key constraint blocking one delete must not fail the whole batch.
//! Only a network-level failure with no per-item structure surfaces as an
//! error.

use anyhow::Result;
use async_trait::async_trait;
use futures::future::join_all;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::core::entity::Entity;
use crate::core::error::ServiceError;
use crate::pipeline::selection::Selection;
use crate::source::service::{BulkFailure, BulkOutcome, CollectionService};

/// A caller-supplied bulk action over one entity type
///
/// Implement `apply` for per-item actions; override `apply_batch` when the
/// backend offers a true batch endpoint with its own per-item result.
#[async_trait]
pub trait BulkHandler<T: Entity>: Send + Sync {
    /// Apply the action to a single entity
    async fn apply(&self, entity: &T) -> Result<()>;

    /// Apply the action to a batch, collecting per-item failures
    ///
    /// The default fans out `apply` per entity and folds the results into a
    /// [`BulkOutcome`]; an individual failure becomes a failed entry with the
    /// service error's user-facing message as the reason.
    async fn apply_batch(&self, entities: &[T]) -> Result<BulkOutcome> {
        let results = join_all(entities.iter().map(|entity| self.apply(entity))).await;
        let mut outcome = BulkOutcome::default();
        for (entity, result) in entities.iter().zip(results) {
            match result {
                Ok(()) => outcome.successful.push(entity.id()),
                Err(err) => outcome.failed.push(BulkFailure {
                    id: entity.id(),
                    reason: failure_reason(err),
                }),
            }
        }
        Ok(outcome)
    }
}

fn failure_reason(err: anyhow::Error) -> String {
    ServiceError::from_boundary(err).user_message()
}

/// Run a bulk action over a batch of entities
pub async fn dispatch<T: Entity>(
    action: &dyn BulkHandler<T>,
    entities: &[T],
) -> Result<BulkOutcome> {
    tracing::debug!(
        entity_type = T::entity_type(),
        count = entities.len(),
        "dispatching bulk action"
    );
    let outcome = action.apply_batch(entities).await?;
    if !outcome.is_clean() {
        tracing::warn!(
            entity_type = T::entity_type(),
            failed = outcome.failed.len(),
            successful = outcome.successful.len(),
            "bulk action reported partial failure"
        );
    }
    Ok(outcome)
}

/// Run a bulk action over the selected subset of `entities`, then drop the
/// successful ids from the selection
///
/// Failed ids remain selected so the user can retry or inspect them. The
/// caller is expected to re-fetch the collection after any success. On a
/// network-level error nothing is removed from the selection; the caller
/// decides whether to retain or clear it.
pub async fn apply_selection<T: Entity>(
    action: &dyn BulkHandler<T>,
    entities: &[T],
    selection: &mut Selection,
) -> Result<BulkOutcome> {
    let selected: Vec<T> = entities
        .iter()
        .filter(|entity| selection.contains(&entity.id()))
        .cloned()
        .collect();
    let outcome = dispatch(action, &selected).await?;
    selection.remove_ids(outcome.successful.iter());
    Ok(outcome)
}

/// The standard delete action, wired to a collection service
///
/// Uses the backend's batch endpoint, so per-item failures come straight
/// from the service's own outcome.
pub struct DeleteAction<T, S> {
    service: Arc<S>,
    _entity: PhantomData<fn() -> T>,
}

impl<T, S> DeleteAction<T, S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T, S> BulkHandler<T> for DeleteAction<T, S>
where
    T: Entity,
    S: CollectionService<T>,
{
    async fn apply(&self, entity: &T) -> Result<()> {
        self.service.delete(&entity.id()).await
    }

    async fn apply_batch(&self, entities: &[T]) -> Result<BulkOutcome> {
        let ids: Vec<_> = entities.iter().map(Entity::id).collect();
        self.service.delete_many(&ids).await
    }
}
