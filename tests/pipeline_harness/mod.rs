//! Shared test harness for pipeline integration testing
//!
//! Provides a `Document` entity with fields covering every `FieldValue`
//! variant, plus builders for single documents and numbered sets.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod pipeline_harness;
//! use pipeline_harness::*;
//! ```

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;

use listwise::core::descriptor::Descriptor;
use listwise::core::entity::{Entity, EntityId};
use listwise::core::field::FieldValue;

// ---------------------------------------------------------------------------
// Document — the archetypal table row, covering all FieldValue variants
// ---------------------------------------------------------------------------

/// A test document in the shape of an ERP document row.
///
/// Fields:
/// - `document_key`: String (the free-text search target)
/// - `title`: String
/// - `status`: Option<String> (Null testing)
/// - `amount`: f64 (Float variant)
/// - `revision`: i64 (Integer variant)
/// - `archived`: bool (Boolean variant)
/// - `circuit_id`: Uuid (Uuid variant)
/// - `posting_date`: DateTime (DateTime variant)
/// - `centre_code`: Option<String> registered as the dotted
///   "responsibilityCentre.code"
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub document_key: String,
    pub title: String,
    pub status: Option<String>,
    pub amount: f64,
    pub revision: i64,
    pub archived: bool,
    pub circuit_id: Uuid,
    pub posting_date: DateTime<Utc>,
    pub centre_code: Option<String>,
}

static DOCUMENT: LazyLock<Descriptor<Document>> = LazyLock::new(|| {
    Descriptor::builder("document")
        .id(|d: &Document| EntityId::Number(d.id))
        .string("documentKey", |d: &Document| d.document_key.clone())
        .string("title", |d: &Document| d.title.clone())
        .opt_string("status", |d: &Document| d.status.clone())
        .float("amount", |d: &Document| d.amount)
        .integer("revision", |d: &Document| d.revision)
        .boolean("archived", |d: &Document| d.archived)
        .uuid("circuitId", |d: &Document| d.circuit_id)
        .date("postingDate", |d: &Document| d.posting_date)
        .field(
            "responsibilityCentre.code",
            listwise::core::field::FieldKind::String,
            |d: &Document| match &d.centre_code {
                Some(code) => FieldValue::String(code.clone()),
                None => FieldValue::Null,
            },
        )
        .searchable(&["documentKey", "title"])
        .build()
});

impl Entity for Document {
    fn entity_type() -> &'static str {
        "document"
    }

    fn descriptor() -> &'static Descriptor<Self> {
        &DOCUMENT
    }
}

/// Build a document with the fields the tests care about
pub fn document(id: i64, key: &str, title: &str) -> Document {
    Document {
        id,
        document_key: key.to_string(),
        title: title.to_string(),
        status: Some("draft".to_string()),
        amount: id as f64 * 100.0,
        revision: 1,
        archived: false,
        circuit_id: Uuid::nil(),
        posting_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::days(id),
        centre_code: None,
    }
}

/// A numbered set: ids 1..=n, keys alternating between invoices ("INV-nnn")
/// and purchase orders ("PO-nnn")
pub fn document_set(n: i64) -> Vec<Document> {
    (1..=n)
        .map(|id| {
            if id % 2 == 1 {
                document(id, &format!("INV-{:03}", id), &format!("Invoice {}", id))
            } else {
                document(id, &format!("PO-{:03}", id), &format!("Purchase order {}", id))
            }
        })
        .collect()
}

/// Numeric ids as selection keys
pub fn number_ids(ids: impl IntoIterator<Item = i64>) -> Vec<EntityId> {
    ids.into_iter().map(EntityId::Number).collect()
}
