//! Paginator: slice the sorted subset into 1-based pages

use serde::{Deserialize, Serialize};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: usize = 100;

/// One rendered page plus the derived pagination counts
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The rows visible on this page
    pub items: Vec<T>,

    /// The page actually served (1-based; may differ from the requested
    /// page after clamping)
    pub current_page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items across all pages
    pub total_items: usize,

    /// Total number of pages
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Whether a later page exists
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether an earlier page exists
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// An empty first page
    pub fn empty(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
            total_pages: 0,
        }
    }
}

/// Slice a sorted slice into the requested page
///
/// A request beyond the last page clamps to the last page and re-slices;
/// callers must not rely on the requested page being honored verbatim. A
/// zero page size is treated as 1. An empty source degrades to an empty
/// page with `current_page == 1`.
pub fn paginate<T: Clone>(sorted: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = sorted.len();
    let total_pages = if total_items == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    };
    let current_page = page.clamp(1, total_pages.max(1));
    let start = (current_page - 1) * page_size;
    let items = sorted.iter().skip(start).take(page_size).cloned().collect();
    Page {
        items,
        current_page,
        page_size,
        total_items,
        total_pages,
    }
}

/// The stateful pagination cursor a view holds between renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Current page number (1-based)
    pub current_page: usize,

    /// Number of items per page
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationState {
    /// Create a cursor on page 1 with the given page size
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Change the page size; always resets to page 1
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.current_page = 1;
    }

    /// Move to a page, clamped to `[1, max(total_pages, 1)]`
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    /// Serve the cursor's page of `items`, writing any clamp back into the
    /// cursor so the next render starts from the page actually shown
    pub fn page_of<T: Clone>(&mut self, items: &[T]) -> Page<T> {
        let page = paginate(items, self.current_page, self.page_size);
        self.current_page = page.current_page;
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_pages_partition_the_dataset() {
        let data = numbers(57);
        let page_size = 25;
        let total_pages = paginate(&data, 1, page_size).total_pages;
        assert_eq!(total_pages, 3);

        let mut seen = Vec::new();
        for page in 1..=total_pages {
            seen.extend(paginate(&data, page, page_size).items);
        }
        assert_eq!(seen, data);
    }

    #[test]
    fn test_total_pages_is_ceiling_division() {
        assert_eq!(paginate(&numbers(100), 1, 25).total_pages, 4);
        assert_eq!(paginate(&numbers(101), 1, 25).total_pages, 5);
        assert_eq!(paginate(&numbers(1), 1, 25).total_pages, 1);
    }

    #[test]
    fn test_last_page_holds_the_remainder() {
        let page = paginate(&numbers(57), 3, 25);
        assert_eq!(page.items.len(), 7);
        assert_eq!(page.items[0], 51);
    }

    #[test]
    fn test_out_of_range_page_clamps_and_reslices() {
        let page = paginate(&numbers(30), 9, 10);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25, 26, 27, 28, 29, 30]);
    }

    #[test]
    fn test_page_zero_clamps_to_one() {
        let page = paginate(&numbers(5), 0, 10);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn test_empty_source_degrades_gracefully() {
        let page = paginate(&Vec::<usize>::new(), 4, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_zero_page_size_never_divides_by_zero() {
        let page = paginate(&numbers(3), 1, 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_has_next_and_prev() {
        let data = numbers(30);
        let first = paginate(&data, 1, 10);
        assert!(first.has_next());
        assert!(!first.has_prev());
        let middle = paginate(&data, 2, 10);
        assert!(middle.has_next());
        assert!(middle.has_prev());
        let last = paginate(&data, 3, 10);
        assert!(!last.has_next());
        assert!(last.has_prev());
    }

    #[test]
    fn test_set_page_size_resets_to_page_one() {
        let mut state = PaginationState::default();
        state.set_page(4, 10);
        assert_eq!(state.current_page, 4);
        state.set_page_size(50);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.page_size, 50);
    }

    #[test]
    fn test_page_size_is_clamped() {
        let mut state = PaginationState::default();
        state.set_page_size(0);
        assert_eq!(state.page_size, 1);
        state.set_page_size(10_000);
        assert_eq!(state.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_of_writes_clamp_back() {
        let mut state = PaginationState {
            current_page: 7,
            page_size: 10,
        };
        let page = state.page_of(&numbers(15));
        assert_eq!(page.current_page, 2);
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_shrinking_dataset_clamps_on_next_render() {
        let mut state = PaginationState {
            current_page: 3,
            page_size: 10,
        };
        // dataset shrank from 30 to 12 items since the cursor was set
        let page = state.page_of(&numbers(12));
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items, vec![11, 12]);
    }
}
