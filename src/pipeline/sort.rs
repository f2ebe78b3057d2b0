//! Sort engine: stable, type-aware ordering by a single field

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;

/// Sort direction
///
/// Descending is the reversal of the ascending comparator, not a separate
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// The active sort, at most one field at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: String,
    pub direction: Direction,
}

impl SortState {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

/// Order the filtered subset by the active sort state
///
/// `None` returns the input unchanged, preserving the filter stage's order.
/// The sort is stable: equal keys keep their relative order. An unknown sort
/// field leaves the order unchanged rather than erroring, so stale persisted
/// sort state degrades to a no-op.
pub fn sort<T: Entity>(mut items: Vec<T>, state: Option<&SortState>) -> Vec<T> {
    let Some(state) = state else {
        return items;
    };
    let descriptor = T::descriptor();
    let Some(kind) = descriptor.kind(&state.field) else {
        tracing::debug!(field = %state.field, "unknown sort field, order left unchanged");
        return items;
    };
    items.sort_by(|a, b| {
        let ordering = descriptor
            .value(a, &state.field)
            .compare(&descriptor.value(b, &state.field), kind);
        match state.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    });
    items
}
