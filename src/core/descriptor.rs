//! Entity descriptors: a typed accessor map per entity type
//!
//! A [`Descriptor`] maps field names to typed extraction functions, built
//! once per entity type. The filter and sort stages read entity fields
//! through it, which keeps "any field of any entity" flexibility without
//! untyped indexing into the entity itself.

use indexmap::IndexMap;

use crate::core::entity::EntityId;
use crate::core::field::{FieldKind, FieldValue};

/// A single named, typed field of an entity
pub struct FieldAccessor<T> {
    name: &'static str,
    kind: FieldKind,
    get: Box<dyn Fn(&T) -> FieldValue + Send + Sync>,
}

impl<T> FieldAccessor<T> {
    /// The field's name as used by filter and sort state
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field's declared kind
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Extract the field's value from an entity
    pub fn value(&self, entity: &T) -> FieldValue {
        (self.get)(entity)
    }
}

/// The accessor map for one entity type
///
/// Field iteration order is declaration order, so a table can derive its
/// column order directly from the descriptor. Nested fields are registered
/// under a dotted name ("centre.code") whose extraction closure performs the
/// traversal and returns [`FieldValue::Null`] when an intermediate is absent.
pub struct Descriptor<T> {
    entity_type: &'static str,
    id: Box<dyn Fn(&T) -> EntityId + Send + Sync>,
    fields: IndexMap<&'static str, FieldAccessor<T>>,
    searchable: Vec<&'static str>,
}

impl<T> Descriptor<T> {
    /// Start building a descriptor for an entity type
    pub fn builder(entity_type: &'static str) -> DescriptorBuilder<T> {
        DescriptorBuilder {
            entity_type,
            id: None,
            fields: IndexMap::new(),
            searchable: None,
        }
    }

    /// The entity type name this descriptor belongs to
    pub fn entity_type(&self) -> &'static str {
        self.entity_type
    }

    /// Resolve an entity's identifier
    pub fn id_of(&self, entity: &T) -> EntityId {
        (self.id)(entity)
    }

    /// Look up a field accessor by name
    pub fn field(&self, name: &str) -> Option<&FieldAccessor<T>> {
        self.fields.get(name)
    }

    /// The declared kind of a field, if it exists
    pub fn kind(&self, name: &str) -> Option<FieldKind> {
        self.fields.get(name).map(FieldAccessor::kind)
    }

    /// Read a field value from an entity
    ///
    /// Unknown field names yield [`FieldValue::Null`] rather than an error,
    /// so stale filter or sort state referencing a removed field degrades to
    /// a no-op instead of breaking the view.
    pub fn value(&self, entity: &T, name: &str) -> FieldValue {
        match self.fields.get(name) {
            Some(accessor) => accessor.value(entity),
            None => FieldValue::Null,
        }
    }

    /// All field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// The fields concatenated by an all-fields free-text search
    pub fn searchable_fields(&self) -> &[&'static str] {
        &self.searchable
    }

    /// The lowercase concatenation of an entity's searchable fields
    pub fn search_blob(&self, entity: &T) -> String {
        let mut blob = String::new();
        for name in &self.searchable {
            if let Some(accessor) = self.fields.get(name) {
                if !blob.is_empty() {
                    blob.push(' ');
                }
                blob.push_str(&accessor.value(entity).text());
            }
        }
        blob
    }
}

/// Builder for [`Descriptor`]
///
/// Descriptors are built once per entity type, typically in a
/// `LazyLock` static.
pub struct DescriptorBuilder<T> {
    entity_type: &'static str,
    id: Option<Box<dyn Fn(&T) -> EntityId + Send + Sync>>,
    fields: IndexMap<&'static str, FieldAccessor<T>>,
    searchable: Option<Vec<&'static str>>,
}

impl<T> DescriptorBuilder<T> {
    /// Register the identifier accessor
    pub fn id(mut self, get: impl Fn(&T) -> EntityId + Send + Sync + 'static) -> Self {
        self.id = Some(Box::new(get));
        self
    }

    /// Register a field with an explicit kind and a raw extraction closure
    ///
    /// The typed helpers below cover the common cases; this is the escape
    /// hatch for nested/dotted fields and computed values.
    pub fn field(
        mut self,
        name: &'static str,
        kind: FieldKind,
        get: impl Fn(&T) -> FieldValue + Send + Sync + 'static,
    ) -> Self {
        self.fields.insert(
            name,
            FieldAccessor {
                name,
                kind,
                get: Box::new(get),
            },
        );
        self
    }

    /// Register a string field
    pub fn string(self, name: &'static str, get: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.field(name, FieldKind::String, move |t| FieldValue::String(get(t)))
    }

    /// Register an optional string field; `None` reads as null
    pub fn opt_string(
        self,
        name: &'static str,
        get: impl Fn(&T) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.field(name, FieldKind::String, move |t| get(t).into())
    }

    /// Register an integer field
    pub fn integer(self, name: &'static str, get: impl Fn(&T) -> i64 + Send + Sync + 'static) -> Self {
        self.field(name, FieldKind::Integer, move |t| FieldValue::Integer(get(t)))
    }

    /// Register a float field
    pub fn float(self, name: &'static str, get: impl Fn(&T) -> f64 + Send + Sync + 'static) -> Self {
        self.field(name, FieldKind::Float, move |t| FieldValue::Float(get(t)))
    }

    /// Register a boolean field
    pub fn boolean(self, name: &'static str, get: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.field(name, FieldKind::Boolean, move |t| FieldValue::Boolean(get(t)))
    }

    /// Register a date field
    pub fn date(
        self,
        name: &'static str,
        get: impl Fn(&T) -> chrono::DateTime<chrono::Utc> + Send + Sync + 'static,
    ) -> Self {
        self.field(name, FieldKind::Date, move |t| FieldValue::DateTime(get(t)))
    }

    /// Register an optional date field; `None` reads as null
    pub fn opt_date(
        self,
        name: &'static str,
        get: impl Fn(&T) -> Option<chrono::DateTime<chrono::Utc>> + Send + Sync + 'static,
    ) -> Self {
        self.field(name, FieldKind::Date, move |t| get(t).into())
    }

    /// Register a UUID field
    pub fn uuid(
        self,
        name: &'static str,
        get: impl Fn(&T) -> uuid::Uuid + Send + Sync + 'static,
    ) -> Self {
        self.field(name, FieldKind::Uuid, move |t| FieldValue::Uuid(get(t)))
    }

    /// Restrict the all-fields free-text search to a fixed set of fields
    ///
    /// When not called, every registered string field is searchable.
    pub fn searchable(mut self, fields: &[&'static str]) -> Self {
        self.searchable = Some(fields.to_vec());
        self
    }

    /// Finish the descriptor
    ///
    /// # Panics
    ///
    /// Panics if no id accessor was registered, or if the searchable list
    /// names an unregistered field. Both are programming errors in the
    /// entity definition, not runtime conditions.
    pub fn build(self) -> Descriptor<T> {
        let id = self
            .id
            .unwrap_or_else(|| panic!("descriptor for '{}' has no id accessor", self.entity_type));
        let searchable = match self.searchable {
            Some(fields) => {
                for name in &fields {
                    assert!(
                        self.fields.contains_key(name),
                        "descriptor for '{}' marks unknown field '{}' searchable",
                        self.entity_type,
                        name
                    );
                }
                fields
            }
            None => self
                .fields
                .values()
                .filter(|f| f.kind == FieldKind::String)
                .map(|f| f.name)
                .collect(),
        };
        Descriptor {
            entity_type: self.entity_type,
            id,
            fields: self.fields,
            searchable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[derive(Clone, Debug)]
    struct Centre {
        code: String,
    }

    #[derive(Clone, Debug)]
    struct Doc {
        id: i64,
        key: String,
        title: String,
        amount: f64,
        centre: Option<Centre>,
        created: chrono::DateTime<Utc>,
    }

    fn descriptor() -> Descriptor<Doc> {
        Descriptor::builder("doc")
            .id(|d: &Doc| EntityId::Number(d.id))
            .string("key", |d: &Doc| d.key.clone())
            .string("title", |d: &Doc| d.title.clone())
            .float("amount", |d: &Doc| d.amount)
            .date("created", |d: &Doc| d.created)
            .field(
                "centre.code",
                FieldKind::String,
                |d: &Doc| match &d.centre {
                    Some(centre) => FieldValue::String(centre.code.clone()),
                    None => FieldValue::Null,
                },
            )
            .searchable(&["key", "title"])
            .build()
    }

    fn sample() -> Doc {
        Doc {
            id: 9,
            key: "INV-001".to_string(),
            title: "Quarterly Invoice".to_string(),
            amount: 120.0,
            centre: None,
            created: Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_value_and_kind_lookup() {
        let desc = descriptor();
        let doc = sample();
        assert_eq!(desc.value(&doc, "key"), FieldValue::String("INV-001".into()));
        assert_eq!(desc.kind("amount"), Some(FieldKind::Float));
        assert_eq!(desc.kind("nope"), None);
        assert_eq!(desc.value(&doc, "nope"), FieldValue::Null);
    }

    #[test]
    fn test_dotted_field_missing_intermediate_is_null() {
        let desc = descriptor();
        let doc = sample();
        assert_eq!(desc.value(&doc, "centre.code"), FieldValue::Null);

        let mut with_centre = sample();
        with_centre.centre = Some(Centre {
            code: "RC-7".to_string(),
        });
        assert_eq!(
            desc.value(&with_centre, "centre.code"),
            FieldValue::String("RC-7".into())
        );
    }

    #[test]
    fn test_search_blob_concatenates_searchable_fields() {
        let desc = descriptor();
        let doc = sample();
        let blob = desc.search_blob(&doc);
        assert!(blob.contains("inv-001"));
        assert!(blob.contains("quarterly invoice"));
        // amount is not searchable
        assert!(!blob.contains("120"));
    }

    #[test]
    fn test_searchable_defaults_to_string_fields() {
        let desc = Descriptor::builder("doc")
            .id(|d: &Doc| EntityId::Number(d.id))
            .string("key", |d: &Doc| d.key.clone())
            .float("amount", |d: &Doc| d.amount)
            .build();
        assert_eq!(desc.searchable_fields(), &["key"]);
    }

    #[test]
    fn test_field_order_is_declaration_order() {
        let desc = descriptor();
        let names: Vec<_> = desc.field_names().collect();
        assert_eq!(
            names,
            vec!["key", "title", "amount", "created", "centre.code"]
        );
    }

    #[test]
    #[should_panic(expected = "no id accessor")]
    fn test_build_without_id_panics() {
        let _ = Descriptor::<Doc>::builder("doc").build();
    }

    #[test]
    #[should_panic(expected = "searchable")]
    fn test_unknown_searchable_field_panics() {
        let _ = Descriptor::builder("doc")
            .id(|d: &Doc| EntityId::Number(d.id))
            .string("key", |d: &Doc| d.key.clone())
            .searchable(&["missing"])
            .build();
    }
}
