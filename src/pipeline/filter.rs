//! Filter engine: free-text search plus structured predicates
//!
//! Filtering is a pure function of the source slice and a [`FilterState`].
//! Invalid predicates — an unknown field, an operator that does not apply to
//! the field's kind, a `Between` missing a bound — are skipped rather than
//! propagated, since they typically come from stale persisted filter state
//! after a schema change.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::core::descriptor::Descriptor;
use crate::core::entity::Entity;
use crate::core::field::{FieldKind, FieldValue};

/// Where a free-text query looks
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchScope {
    /// Match against the concatenation of the descriptor's searchable fields
    #[default]
    All,
    /// Match against a single named field
    Field(String),
}

/// How multiple predicates combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Combine {
    /// Every predicate must pass
    #[default]
    And,
    /// Any predicate may pass
    Or,
}

/// A structured filter operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    Between,
    IsEmpty,
    IsNotEmpty,
}

/// A single structured predicate against one field
///
/// `second` is only meaningful for [`Operator::Between`], which is inclusive
/// on both bounds. `IsEmpty`/`IsNotEmpty` ignore `value` entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: String,
    pub op: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<FieldValue>,
}

impl Predicate {
    /// Build a predicate with a single comparison value
    pub fn new(field: impl Into<String>, op: Operator, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            op,
            value: Some(value.into()),
            second: None,
        }
    }

    /// Build an inclusive between predicate
    pub fn between(
        field: impl Into<String>,
        low: impl Into<FieldValue>,
        high: impl Into<FieldValue>,
    ) -> Self {
        Self {
            field: field.into(),
            op: Operator::Between,
            value: Some(low.into()),
            second: Some(high.into()),
        }
    }

    /// Build a presence predicate (`IsEmpty` / `IsNotEmpty`)
    pub fn presence(field: impl Into<String>, op: Operator) -> Self {
        Self {
            field: field.into(),
            op,
            value: None,
            second: None,
        }
    }
}

/// Per-view filter configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text query; empty or whitespace-only means no text filtering
    #[serde(default)]
    pub query: String,

    /// Scope of the free-text query
    #[serde(default)]
    pub scope: SearchScope,

    /// Structured predicates, combined per `combine`
    #[serde(default)]
    pub predicates: Vec<Predicate>,

    /// Combination mode when multiple predicates exist
    #[serde(default)]
    pub combine: Combine,
}

impl FilterState {
    /// A state carrying only a free-text query over all searchable fields
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Whether this state filters anything at all
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || !self.predicates.is_empty()
    }
}

/// Reduce a source slice to the subset matching the filter state
///
/// Pure; survivors are cloned in source order.
pub fn filter<T: Entity>(source: &[T], state: &FilterState) -> Vec<T> {
    let descriptor = T::descriptor();
    source
        .iter()
        .filter(|entity| {
            matches_query(descriptor, entity, state) && matches_predicates(descriptor, entity, state)
        })
        .cloned()
        .collect()
}

fn matches_query<T>(descriptor: &Descriptor<T>, entity: &T, state: &FilterState) -> bool {
    let query = state.query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    match &state.scope {
        SearchScope::All => descriptor.search_blob(entity).contains(&query),
        SearchScope::Field(field) => descriptor.value(entity, field).text().contains(&query),
    }
}

fn matches_predicates<T>(descriptor: &Descriptor<T>, entity: &T, state: &FilterState) -> bool {
    let mut verdicts = Vec::with_capacity(state.predicates.len());
    for predicate in &state.predicates {
        match evaluate(descriptor, entity, predicate) {
            Some(verdict) => verdicts.push(verdict),
            None => {
                tracing::debug!(
                    field = %predicate.field,
                    op = ?predicate.op,
                    "skipping invalid filter predicate"
                );
            }
        }
    }
    if verdicts.is_empty() {
        return true;
    }
    match state.combine {
        Combine::And => verdicts.iter().all(|v| *v),
        Combine::Or => verdicts.iter().any(|v| *v),
    }
}

/// Evaluate one predicate; `None` means the predicate is invalid and skipped
fn evaluate<T>(descriptor: &Descriptor<T>, entity: &T, predicate: &Predicate) -> Option<bool> {
    let kind = descriptor.kind(&predicate.field)?;
    let actual = descriptor.value(entity, &predicate.field);

    match predicate.op {
        Operator::IsEmpty => Some(is_empty(&actual)),
        Operator::IsNotEmpty => Some(!is_empty(&actual)),
        Operator::Contains | Operator::StartsWith | Operator::EndsWith => {
            if kind != FieldKind::String {
                return None;
            }
            let needle = predicate.value.as_ref()?.text();
            if is_empty(&actual) {
                return Some(false);
            }
            let haystack = actual.text();
            Some(match predicate.op {
                Operator::Contains => haystack.contains(&needle),
                Operator::StartsWith => haystack.starts_with(&needle),
                _ => haystack.ends_with(&needle),
            })
        }
        Operator::Equals => {
            let expected = predicate.value.as_ref()?;
            if is_empty(&actual) {
                return Some(false);
            }
            Some(actual.compare(expected, kind) == Ordering::Equal)
        }
        Operator::GreaterThan | Operator::LessThan => {
            if !kind.is_ordered() {
                return None;
            }
            let bound = predicate.value.as_ref()?;
            if actual.is_null() {
                return Some(false);
            }
            let ordering = actual.compare(bound, kind);
            Some(match predicate.op {
                Operator::GreaterThan => ordering == Ordering::Greater,
                _ => ordering == Ordering::Less,
            })
        }
        Operator::Between => {
            if !kind.is_ordered() {
                return None;
            }
            let (Some(low), Some(high)) = (predicate.value.as_ref(), predicate.second.as_ref())
            else {
                return None;
            };
            if actual.is_null() {
                return Some(false);
            }
            Some(
                actual.compare(low, kind) != Ordering::Less
                    && actual.compare(high, kind) != Ordering::Greater,
            )
        }
    }
}

fn is_empty(value: &FieldValue) -> bool {
    match value {
        FieldValue::Null => true,
        FieldValue::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
