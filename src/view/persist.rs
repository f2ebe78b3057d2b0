//! Persistence port for view state
//!
//! Remembering a table's filter, sort and page size between sessions is an
//! injected capability, not a hidden singleton: a view is handed a
//! [`StatePersistence`] implementation and a per-view key, and loads/saves a
//! [`PersistedView`] through it. Stale or corrupt persisted state must never
//! break a view — loading falls back to defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::core::error::PersistError;
use crate::pipeline::filter::FilterState;
use crate::pipeline::paginate::DEFAULT_PAGE_SIZE;
use crate::pipeline::sort::SortState;

/// The subset of a view's state worth keeping between sessions
///
/// Never the current page (a restored view starts on page 1) and never the
/// selection (selection is cleared on navigation away, not remembered).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedView {
    #[serde(default)]
    pub filter: FilterState,

    #[serde(default)]
    pub sort: Option<SortState>,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for PersistedView {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            sort: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Injected read/write capability for view state, keyed by a per-view
/// identifier ("documents", "customers", ...)
pub trait StatePersistence: Send + Sync {
    /// Load the persisted state for a view; `Ok(None)` when nothing was saved
    fn load(&self, view_key: &str) -> Result<Option<PersistedView>, PersistError>;

    /// Save the state for a view, replacing any previous entry
    fn save(&self, view_key: &str, view: &PersistedView) -> Result<(), PersistError>;
}

/// In-memory persistence, for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, PersistedView>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatePersistence for MemoryStore {
    fn load(&self, view_key: &str) -> Result<Option<PersistedView>, PersistError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(view_key).cloned())
    }

    fn save(&self, view_key: &str, view: &PersistedView) -> Result<(), PersistError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(view_key.to_string(), view.clone());
        Ok(())
    }
}

/// File-backed persistence: one JSON object per store file, one entry per
/// view key
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_entries(&self) -> Result<HashMap<String, PersistedView>, PersistError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl StatePersistence for JsonFileStore {
    fn load(&self, view_key: &str) -> Result<Option<PersistedView>, PersistError> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(view_key))
    }

    fn save(&self, view_key: &str, view: &PersistedView) -> Result<(), PersistError> {
        // A corrupt store file is replaced rather than kept broken.
        let mut entries = self.read_entries().unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "replacing unreadable view-state store");
            HashMap::new()
        });
        entries.insert(view_key.to_string(), view.clone());
        let content = serde_json::to_string_pretty(&entries)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
