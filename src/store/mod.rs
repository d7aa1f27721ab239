//! Document storage for payroll records.
//!
//! The service depends on a small document store contract: `create` writes a
//! new document and returns its id, `query` returns every document whose
//! fields exactly match a [`Filter`]. Backends implement [`DocumentStore`];
//! [`PayrollRepository`] layers typed records on top.
//!
//! # Example
//!
//! ```
//! use certified_payroll::store::{DocumentStore, Filter, MemoryStore};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = MemoryStore::new();
//! let id = store.create("employee", json!({"name": "Dana Ruiz"})).await.unwrap();
//! let found = store.query("employee", &Filter::new().field("id", id.as_str())).await.unwrap();
//! assert_eq!(found[0]["name"], "Dana Ruiz");
//! # }
//! ```

mod file;
mod memory;
mod repository;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::{PayrollRepository, collections};

/// Field assigned by the store to every document.
pub const ID_FIELD: &str = "id";
/// Timestamp assigned by the store to every document.
pub const CREATED_AT_FIELD: &str = "created_at";

/// Exact-match filter over top-level document fields.
///
/// An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: BTreeMap<String, Value>,
}

impl Filter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `field` to equal `value`.
    pub fn field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Requires `field` to equal `value` when a value is given.
    pub fn field_opt(self, field: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.field(field, value),
            None => self,
        }
    }

    /// Returns true if the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if every condition holds for `document`.
    pub fn matches(&self, document: &Value) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

/// A document store backend.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short name of the backend, reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Persists a new document and returns its assigned id.
    ///
    /// `document` must be a JSON object. The store adds [`ID_FIELD`] and
    /// [`CREATED_AT_FIELD`], overwriting any caller-supplied values.
    async fn create(&self, collection: &str, document: Value) -> StoreResult<String>;

    /// Returns all documents in `collection` matching `filter`, in insertion order.
    async fn query(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Value>>;

    /// Names of the collections that currently hold documents.
    async fn collections(&self) -> StoreResult<Vec<String>>;
}

/// Stamps a new document with a fresh id and creation time.
fn stamp_document(collection: &str, document: Value) -> StoreResult<(String, Value)> {
    let Value::Object(fields) = document else {
        return Err(StoreError::InvalidDocument {
            collection: collection.to_string(),
            message: "document must be a JSON object".to_string(),
        });
    };

    let id = Uuid::new_v4().simple().to_string();
    let mut stamped = Map::with_capacity(fields.len() + 2);
    stamped.insert(ID_FIELD.to_string(), Value::String(id.clone()));
    stamped.insert(
        CREATED_AT_FIELD.to_string(),
        Value::String(Utc::now().to_rfc3339()),
    );
    for (key, value) in fields {
        if key != ID_FIELD && key != CREATED_AT_FIELD {
            stamped.insert(key, value);
        }
    }

    Ok((id, Value::Object(stamped)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(Filter::new().matches(&json!({"a": 1})));
        assert!(Filter::new().matches(&json!({})));
    }

    #[test]
    fn test_filter_requires_every_field() {
        let filter = Filter::new().field("project_id", "p1").field("week_ending", "2026-01-17");

        assert!(filter.matches(&json!({"project_id": "p1", "week_ending": "2026-01-17", "hours": "8"})));
        assert!(!filter.matches(&json!({"project_id": "p1", "week_ending": "2026-01-24"})));
        assert!(!filter.matches(&json!({"project_id": "p1"})));
    }

    #[test]
    fn test_filter_is_exact_not_prefix_or_case_insensitive() {
        let filter = Filter::new().field("craft", "Electrician");
        assert!(!filter.matches(&json!({"craft": "electrician"})));
        assert!(!filter.matches(&json!({"craft": "Electrician "})));
    }

    #[test]
    fn test_field_opt_skips_missing_values() {
        let filter = Filter::new().field_opt("project_id", None::<&str>);
        assert!(filter.is_empty());

        let filter = Filter::new().field_opt("project_id", Some("p1"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_stamp_document_assigns_id_and_timestamp() {
        let (id, doc) = stamp_document("employee", json!({"name": "Dana", "id": "forged"})).unwrap();

        assert_eq!(doc[ID_FIELD], id.as_str());
        assert_ne!(id, "forged");
        assert!(doc[CREATED_AT_FIELD].is_string());
        assert_eq!(doc["name"], "Dana");
    }

    #[test]
    fn test_stamp_document_rejects_non_objects() {
        let err = stamp_document("employee", json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument { .. }));
    }
}
