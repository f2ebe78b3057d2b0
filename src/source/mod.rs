//! The remote-collection boundary
//!
//! Everything that suspends lives here: the [`CollectionService`] contract
//! with a remote backend, the [`SourceFetcher`] that owns loading/error state
//! and discards stale responses, and the bulk dispatcher that turns partial
//! backend failure into a first-class outcome.

pub mod bulk;
pub mod fetcher;
pub mod in_memory;
#[cfg(feature = "rest")]
pub mod rest;
pub mod service;

pub use bulk::{BulkHandler, DeleteAction};
pub use fetcher::{FetchState, RefreshOutcome, SourceFetcher};
pub use in_memory::InMemoryCollectionService;
#[cfg(feature = "rest")]
pub use rest::RestCollectionService;
pub use service::{BulkFailure, BulkOutcome, CollectionService};
