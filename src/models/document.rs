//! Stored document envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record read back from the document store.
///
/// The store-assigned `id` and `created_at` are flattened next to the
/// record's own fields, so a stored project serializes as
/// `{"id": ..., "created_at": ..., "name": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    /// Identifier assigned by the store.
    pub id: String,
    /// When the store wrote the document.
    pub created_at: DateTime<Utc>,
    /// The typed record.
    #[serde(flatten)]
    pub record: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Employee;

    #[test]
    fn test_stored_flattens_record_fields() {
        let json = serde_json::json!({
            "id": "e1",
            "created_at": "2026-01-19T08:00:00Z",
            "name": "Dana Ruiz",
            "classification": "Laborer"
        });

        let stored: Stored<Employee> = serde_json::from_value(json).unwrap();
        assert_eq!(stored.id, "e1");
        assert_eq!(stored.record.name, "Dana Ruiz");

        let back = serde_json::to_value(&stored).unwrap();
        assert_eq!(back["id"], "e1");
        assert_eq!(back["name"], "Dana Ruiz");
    }

    #[test]
    fn test_stored_requires_id() {
        let json = serde_json::json!({
            "created_at": "2026-01-19T08:00:00Z",
            "name": "Dana Ruiz"
        });
        assert!(serde_json::from_value::<Stored<Employee>>(json).is_err());
    }
}
