//! Source fetcher: collection loading with stale-response discard

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::error::ServiceError;
use crate::source::service::CollectionService;

/// The loading state a view renders from
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// No fetch has been issued yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded
    Ready(Vec<T>),
    /// The last fetch failed; the message is already user-facing
    Failed(String),
}

/// What a single `refresh` call ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome<T> {
    /// This call's response was installed as the current data
    Installed(Vec<T>),
    /// A newer refresh started while this one was in flight; its response
    /// was discarded
    Stale,
    /// The fetch failed; the error state was installed
    Failed(ServiceError),
}

/// Owns a collection snapshot and the request-identity guard
///
/// Repeated refreshes can resolve out of order; only the newest request's
/// result may be installed. Each `refresh` takes a sequence ticket up front
/// and checks it after the service call resolves — an out-of-order response
/// is simply ignored, without cancelling the underlying request.
pub struct SourceFetcher<T, S> {
    service: Arc<S>,
    state: Arc<RwLock<FetchState<T>>>,
    sequence: Arc<AtomicU64>,
}

impl<T, S> Clone for SourceFetcher<T, S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            state: Arc::clone(&self.state),
            sequence: Arc::clone(&self.sequence),
        }
    }
}

impl<T, S> SourceFetcher<T, S>
where
    T: Clone + Send + Sync + 'static,
    S: CollectionService<T>,
{
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            state: Arc::new(RwLock::new(FetchState::Idle)),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The service this fetcher loads from
    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// The current loading state
    pub fn state(&self) -> FetchState<T> {
        self.read_state().clone()
    }

    /// The current data snapshot; empty unless `Ready`
    ///
    /// A failed fetch deliberately reads as an empty dataset so the view can
    /// render a placeholder alongside the retry affordance.
    pub fn data(&self) -> Vec<T> {
        match &*self.read_state() {
            FetchState::Ready(items) => items.clone(),
            _ => Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(&*self.read_state(), FetchState::Loading)
    }

    /// Re-fetch the collection
    ///
    /// Overlapping calls are safe: every call observes its own ticket and
    /// only the one holding the newest ticket installs its result. A
    /// superseded call returns [`RefreshOutcome::Stale`] and changes nothing.
    pub async fn refresh(&self) -> RefreshOutcome<T> {
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        *self.write_state() = FetchState::Loading;

        let result = self.service.fetch_all().await;

        if self.sequence.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "discarding stale fetch response");
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "collection refreshed");
                *self.write_state() = FetchState::Ready(items.clone());
                RefreshOutcome::Installed(items)
            }
            Err(err) => {
                let service_err = ServiceError::from_boundary(err);
                tracing::warn!(error = %service_err, "collection fetch failed");
                *self.write_state() = FetchState::Failed(service_err.user_message());
                RefreshOutcome::Failed(service_err)
            }
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, FetchState<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, FetchState<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
