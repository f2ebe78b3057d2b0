//! Selection tracker: a set of entity identifiers surviving paging and
//! filtering
//!
//! The tracker owns nothing but identifiers. The current page's id list and
//! the full dataset's id list change with every filter/page change, so every
//! operation takes them as parameters and every derived value is computed
//! fresh — nothing here can go stale or panic on an inconsistent id list.

use std::collections::HashSet;

use crate::core::entity::EntityId;

/// Derived summary of what the selection covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Nothing selected
    None,
    /// Exactly the current page's rows, nothing else
    Page,
    /// Every row in the full dataset
    All,
    /// Anything else
    Mixed,
}

/// The set of selected entity identifiers
///
/// Selection persists across page navigation and across filter changes: an
/// item stays selected even when a filter later hides it, which is what makes
/// "select across pages, then act" work. The pipeline never clears a
/// selection implicitly — only the caller does, typically after a successful
/// bulk action or on navigation away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<EntityId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected identifiers
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.selected.contains(id)
    }

    /// Iterate the selected identifiers (no particular order)
    pub fn ids(&self) -> impl Iterator<Item = &EntityId> + '_ {
        self.selected.iter()
    }

    /// Flip membership of a single identifier
    pub fn toggle(&mut self, id: EntityId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Toggle the whole current page
    ///
    /// If every id on the page is already selected, removes exactly the
    /// page's ids; otherwise unions them in. Ids on other pages are never
    /// touched. An empty page list is a no-op.
    pub fn toggle_page(&mut self, page_ids: &[EntityId]) {
        if self.is_page_selected(page_ids) {
            for id in page_ids {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(page_ids.iter().cloned());
        }
    }

    /// Union in every identifier of the full dataset
    ///
    /// The caller supplies the complete id list, which may mean resolving
    /// rows beyond the current page.
    pub fn select_all(&mut self, all_ids: &[EntityId]) {
        self.selected.extend(all_ids.iter().cloned());
    }

    /// Clear the selection entirely
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Flip each current-page id independently; other pages untouched
    pub fn invert_page(&mut self, page_ids: &[EntityId]) {
        for id in page_ids {
            self.toggle(id.clone());
        }
    }

    /// Remove a batch of identifiers (bulk-action success cleanup)
    pub fn remove_ids<'a>(&mut self, ids: impl IntoIterator<Item = &'a EntityId>) {
        for id in ids {
            self.selected.remove(id);
        }
    }

    /// Drop identifiers that are no longer present in a fresh snapshot
    pub fn retain_existing(&mut self, existing: &[EntityId]) {
        let live: HashSet<&EntityId> = existing.iter().collect();
        self.selected.retain(|id| live.contains(id));
    }

    /// How many of the current page's rows are selected
    pub fn selected_on_page(&self, page_ids: &[EntityId]) -> usize {
        page_ids.iter().filter(|id| self.selected.contains(id)).count()
    }

    /// Whether the current page is fully selected (false for an empty page)
    pub fn is_page_selected(&self, page_ids: &[EntityId]) -> bool {
        !page_ids.is_empty() && page_ids.iter().all(|id| self.selected.contains(id))
    }

    /// Whether every row of the full dataset is selected (false for an empty
    /// dataset)
    pub fn is_all_selected(&self, all_ids: &[EntityId]) -> bool {
        !all_ids.is_empty() && all_ids.iter().all(|id| self.selected.contains(id))
    }

    /// Whether something, but not the full dataset, is selected
    pub fn is_partial(&self, all_ids: &[EntityId]) -> bool {
        !self.is_empty() && !self.is_all_selected(all_ids)
    }

    /// Derive the selection mode against the supplied id lists
    ///
    /// `All` wins when the dataset fits on a single fully-selected page.
    /// `Page` requires covering the current page exactly and nothing else.
    pub fn mode(&self, page_ids: &[EntityId], all_ids: &[EntityId]) -> SelectionMode {
        if self.is_empty() {
            return SelectionMode::None;
        }
        if self.is_all_selected(all_ids) {
            return SelectionMode::All;
        }
        if self.is_page_selected(page_ids) && self.len() == page_ids.len() {
            return SelectionMode::Page;
        }
        SelectionMode::Mixed
    }
}

impl FromIterator<EntityId> for Selection {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}
