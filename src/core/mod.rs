//! Core module containing the entity abstraction, field values and errors

pub mod descriptor;
pub mod entity;
pub mod error;
pub mod field;

pub use descriptor::{Descriptor, DescriptorBuilder, FieldAccessor};
pub use entity::{Entity, EntityId};
pub use error::{ListwiseError, PersistError, ServiceError};
pub use field::{FieldKind, FieldValue};
