//! Per-table view state and its persistence port
//!
//! One [`ViewState`](state::ViewState) per table instance replaces the
//! source's hidden module-level caches: it is created explicitly, passed
//! explicitly, and persists its filter/sort/page-size through an injected
//! [`StatePersistence`](persist::StatePersistence) capability instead of a
//! singleton store.

pub mod persist;
pub mod state;

pub use persist::{JsonFileStore, MemoryStore, PersistedView, StatePersistence};
pub use state::ViewState;
