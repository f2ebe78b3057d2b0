//! Per-table view state: filter, sort, pagination and selection in one
//! explicitly owned object

use std::marker::PhantomData;

use crate::core::entity::{Entity, EntityId};
use crate::pipeline::filter::{Combine, FilterState, Predicate, SearchScope, filter};
use crate::pipeline::paginate::{Page, PaginationState};
use crate::pipeline::selection::{Selection, SelectionMode};
use crate::pipeline::sort::{Direction, SortState, sort};
use crate::view::persist::{PersistedView, StatePersistence};

/// The complete client-side state of one entity table
///
/// One `ViewState` per table instance, created when the view mounts and
/// passed explicitly wherever it is needed. It owns the four pipeline states
/// and recomputes the visible page from whatever data snapshot the fetcher
/// currently holds; the snapshot itself stays with the fetcher.
///
/// Changing the filter or the sort invalidates the visible window, so both
/// reset the cursor to page 1. Pagination alone never touches the selection,
/// and the selection is only ever mutated through the explicit selection
/// methods or the bulk dispatcher's post-success cleanup.
pub struct ViewState<T: Entity> {
    filter: FilterState,
    sort: Option<SortState>,
    pagination: PaginationState,
    selection: Selection,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Default for ViewState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> ViewState<T> {
    pub fn new() -> Self {
        Self {
            filter: FilterState::default(),
            sort: None,
            pagination: PaginationState::default(),
            selection: Selection::new(),
            _entity: PhantomData,
        }
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            pagination: PaginationState::with_page_size(page_size),
            ..Self::new()
        }
    }

    // -----------------------------------------------------------------------
    // Pipeline recomputation
    // -----------------------------------------------------------------------

    /// The filtered, sorted subset of a data snapshot
    pub fn visible(&self, data: &[T]) -> Vec<T> {
        sort(filter(data, &self.filter), self.sort.as_ref())
    }

    /// Recompute the visible page from a data snapshot
    ///
    /// Filter, then sort, then paginate. Any clamp (the filtered set shrank
    /// below the cursor) is written back, so the next render starts from the
    /// page actually shown.
    pub fn apply(&mut self, data: &[T]) -> Page<T> {
        let visible = self.visible(data);
        self.pagination.page_of(&visible)
    }

    /// Install a fresh snapshot after a re-fetch
    ///
    /// Selected ids still present in the new snapshot stay selected; ids of
    /// rows that no longer exist are pruned. Callers wanting a hard reset
    /// call [`clear_selection`](Self::clear_selection) themselves.
    pub fn install_refresh(&mut self, data: &[T]) {
        let existing: Vec<EntityId> = data.iter().map(Entity::id).collect();
        self.selection.retain_existing(&existing);
    }

    // -----------------------------------------------------------------------
    // Filter mutators — each invalidates the visible window
    // -----------------------------------------------------------------------

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.pagination.current_page = 1;
    }

    pub fn set_scope(&mut self, scope: SearchScope) {
        self.filter.scope = scope;
        self.pagination.current_page = 1;
    }

    pub fn set_predicates(&mut self, predicates: Vec<Predicate>) {
        self.filter.predicates = predicates;
        self.pagination.current_page = 1;
    }

    pub fn set_combine(&mut self, combine: Combine) {
        self.filter.combine = combine;
        self.pagination.current_page = 1;
    }

    // -----------------------------------------------------------------------
    // Sort mutators
    // -----------------------------------------------------------------------

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
        self.pagination.current_page = 1;
    }

    /// Cycle a column header: ascending, then descending, then off
    ///
    /// Clicking a different column starts over at ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = match self.sort.take() {
            Some(current) if current.field == field => match current.direction {
                Direction::Ascending => Some(SortState::descending(field)),
                Direction::Descending => None,
            },
            _ => Some(SortState::ascending(field)),
        };
        self.pagination.current_page = 1;
    }

    // -----------------------------------------------------------------------
    // Pagination
    // -----------------------------------------------------------------------

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Request a page; the actual page served is clamped at the next
    /// [`apply`](Self::apply)
    pub fn set_page(&mut self, page: usize) {
        self.pagination.current_page = page.max(1);
    }

    /// Change the page size; always returns the view to page 1
    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.set_page_size(page_size);
    }

    // -----------------------------------------------------------------------
    // Selection — the id lists are derived fresh per call
    // -----------------------------------------------------------------------

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Ids of the rows on the current page
    pub fn page_ids(&self, data: &[T]) -> Vec<EntityId> {
        let visible = self.visible(data);
        crate::pipeline::paginate::paginate(
            &visible,
            self.pagination.current_page,
            self.pagination.page_size,
        )
        .items
        .iter()
        .map(Entity::id)
        .collect()
    }

    /// Ids of every row matching the current filter, across all pages
    ///
    /// This is the "all data" list the selection mode is derived against:
    /// select-all selects everything the user is looking at, not rows a
    /// filter currently hides.
    pub fn visible_ids(&self, data: &[T]) -> Vec<EntityId> {
        self.visible(data).iter().map(Entity::id).collect()
    }

    pub fn toggle(&mut self, id: EntityId) {
        self.selection.toggle(id);
    }

    /// Select the current page, or deselect it if it is fully selected
    pub fn toggle_select_page(&mut self, data: &[T]) {
        let page_ids = self.page_ids(data);
        self.selection.toggle_page(&page_ids);
    }

    /// Select every row matching the current filter, across all pages
    pub fn select_all_visible(&mut self, data: &[T]) {
        let all_ids = self.visible_ids(data);
        self.selection.select_all(&all_ids);
    }

    /// Flip each current-page row's selection independently
    pub fn invert_page(&mut self, data: &[T]) {
        let page_ids = self.page_ids(data);
        self.selection.invert_page(&page_ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Derive the selection mode against the current page and the visible set
    pub fn selection_mode(&self, data: &[T]) -> SelectionMode {
        self.selection
            .mode(&self.page_ids(data), &self.visible_ids(data))
    }

    /// The selected entities of a snapshot, in snapshot order
    pub fn selected_entities(&self, data: &[T]) -> Vec<T> {
        data.iter()
            .filter(|entity| self.selection.contains(&entity.id()))
            .cloned()
            .collect()
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// The persistable subset of this view's state
    pub fn to_persisted(&self) -> PersistedView {
        PersistedView {
            filter: self.filter.clone(),
            sort: self.sort.clone(),
            page_size: self.pagination.page_size,
        }
    }

    /// A view restored from persisted state, on page 1 with nothing selected
    pub fn from_persisted(persisted: PersistedView) -> Self {
        Self {
            filter: persisted.filter,
            sort: persisted.sort,
            pagination: PaginationState::with_page_size(persisted.page_size),
            selection: Selection::new(),
            _entity: PhantomData,
        }
    }

    /// Restore a view through the persistence port
    ///
    /// A missing entry, a load failure or a corrupt payload all fall back to
    /// defaults — stale persisted state must never break a view.
    pub fn restored(store: &dyn StatePersistence, view_key: &str) -> Self {
        match store.load(view_key) {
            Ok(Some(persisted)) => Self::from_persisted(persisted),
            Ok(None) => Self::new(),
            Err(err) => {
                tracing::warn!(
                    view_key,
                    error = %err,
                    "ignoring unreadable persisted view state"
                );
                Self::new()
            }
        }
    }

    /// Save this view's persistable state through the persistence port
    pub fn persist(
        &self,
        store: &dyn StatePersistence,
        view_key: &str,
    ) -> Result<(), crate::core::error::PersistError> {
        store.save(view_key, &self.to_persisted())
    }
}
