//! Entity trait and identifier type

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::core::descriptor::Descriptor;

/// The stable unique identifier of an entity, used as the selection key
///
/// Backends are not uniform: some collections identify rows by a numeric id,
/// others by a string code, others by UUID. The pipeline treats all three as
/// one opaque, hashable key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Uuid(Uuid),
    Code(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Uuid(u) => write!(f, "{}", u),
            EntityId::Code(c) => write!(f, "{}", c),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Number(n)
    }
}

impl From<Uuid> for EntityId {
    fn from(u: Uuid) -> Self {
        EntityId::Uuid(u)
    }
}

impl From<&str> for EntityId {
    fn from(code: &str) -> Self {
        EntityId::Code(code.to_string())
    }
}

impl From<String> for EntityId {
    fn from(code: String) -> Self {
        EntityId::Code(code)
    }
}

/// Base trait for all entities managed by a collection view
///
/// Entities are immutable snapshots fetched from the backend; the pipeline
/// never mutates their fields — mutations happen through the collection
/// service and trigger a re-fetch.
///
/// An implementation supplies a singular type name and a [`Descriptor`], the
/// typed accessor map built once per entity type. The descriptor is what the
/// filter and sort stages use to read field values, so entities stay plain
/// structs with no dynamic indexing.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The entity type name (singular, e.g. "document")
    fn entity_type() -> &'static str;

    /// The typed accessor map for this entity type
    fn descriptor() -> &'static Descriptor<Self>;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> EntityId {
        Self::descriptor().id_of(self)
    }
}
