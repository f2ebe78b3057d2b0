//! # Listwise
//!
//! A generic collection-view pipeline for building entity tables in admin
//! front-ends: search, filter, sort, paginate and bulk-select, implemented
//! once and parameterized by an entity descriptor instead of duplicated per
//! entity type.
//!
//! ## Features
//!
//! - **Entity Descriptors**: typed accessor map per entity type — field
//!   lookup is a function call, not untyped indexing
//! - **Filter Engine**: free-text search (all fields or one field) plus
//!   structured predicates combined with AND/OR
//! - **Sort Engine**: stable, type-aware ordering with a single active field
//! - **Paginator**: 1-based pages with clamping and page-size reset rules
//! - **Selection Tracker**: identifier set surviving paging and filtering,
//!   with derived page/all/mixed modes
//! - **Bulk Dispatcher**: partial failure as a first-class outcome
//! - **Source Fetcher**: async collection loading with stale-response discard
//! - **View State**: one explicit object per table, with an injected
//!   persistence port for remembering filter/sort/page-size between sessions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listwise::prelude::*;
//! use std::sync::LazyLock;
//!
//! #[derive(Clone)]
//! struct Customer {
//!     id: i64,
//!     name: String,
//!     balance: f64,
//! }
//!
//! static CUSTOMER: LazyLock<Descriptor<Customer>> = LazyLock::new(|| {
//!     Descriptor::builder("customer")
//!         .id(|c: &Customer| EntityId::Number(c.id))
//!         .string("name", |c: &Customer| c.name.clone())
//!         .float("balance", |c: &Customer| c.balance)
//!         .build()
//! });
//!
//! impl Entity for Customer {
//!     fn entity_type() -> &'static str {
//!         "customer"
//!     }
//!
//!     fn descriptor() -> &'static Descriptor<Self> {
//!         &CUSTOMER
//!     }
//! }
//!
//! let mut view = ViewState::<Customer>::new();
//! view.set_query("acme");
//! let page = view.apply(&customers);
//! ```

pub mod core;
pub mod pipeline;
pub mod source;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        descriptor::{Descriptor, DescriptorBuilder, FieldAccessor},
        entity::{Entity, EntityId},
        error::{ListwiseError, PersistError, ServiceError},
        field::{FieldKind, FieldValue},
    };

    // === Pipeline stages ===
    pub use crate::pipeline::{
        debounce::Debouncer,
        filter::{Combine, FilterState, Operator, Predicate, SearchScope, filter},
        paginate::{Page, PaginationState, paginate},
        selection::{Selection, SelectionMode},
        sort::{Direction, SortState, sort},
    };

    // === Source boundary ===
    pub use crate::source::{
        bulk::{BulkHandler, DeleteAction, apply_selection, dispatch},
        fetcher::{FetchState, RefreshOutcome, SourceFetcher},
        in_memory::InMemoryCollectionService,
        service::{BulkFailure, BulkOutcome, CollectionService},
    };
    #[cfg(feature = "rest")]
    pub use crate::source::rest::RestCollectionService;

    // === View glue ===
    pub use crate::view::{
        persist::{JsonFileStore, MemoryStore, PersistedView, StatePersistence},
        state::ViewState,
    };

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
