//! The collection pipeline stages
//!
//! Data flows one direction: source snapshot → [`filter`](filter::filter) →
//! [`sort`](sort::sort) → [`paginate`](paginate::paginate) → rendered rows.
//! [`Selection`](selection::Selection) is orthogonal, keyed by entity
//! identifier, and intersected with the current page. Every stage here is a
//! pure synchronous function over in-memory data; only the source boundary
//! suspends.

pub mod debounce;
pub mod filter;
pub mod paginate;
pub mod selection;
pub mod sort;

pub use debounce::Debouncer;
pub use filter::{Combine, FilterState, Operator, Predicate, SearchScope};
pub use paginate::{Page, PaginationState};
pub use selection::{Selection, SelectionMode};
pub use sort::{Direction, SortState};
