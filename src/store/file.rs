//! File-backed document store.
//!
//! Each collection is a JSON-lines file named `<collection>.jsonl` inside the
//! data directory. Writes append a single line; queries scan the file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

use super::{DocumentStore, Filter, stamp_document};

const EXTENSION: &str = "jsonl";

/// A document store persisting collections as JSON-lines files.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, collection: &str) -> StoreResult<PathBuf> {
        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(StoreError::InvalidDocument {
                collection: collection.to_string(),
                message: "collection names may only contain letters, digits and '_'".to_string(),
            });
        }
        Ok(self.dir.join(format!("{collection}.{EXTENSION}")))
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn create(&self, collection: &str, document: Value) -> StoreResult<String> {
        let path = self.collection_path(collection)?;
        let (id, document) = stamp_document(collection, document)?;

        let mut line = serde_json::to_string(&document)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.sync_data().await?;

        debug!(collection, id = %id, "Appended document");
        Ok(id)
    }

    async fn query(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Value>> {
        let path = self.collection_path(collection)?;
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut documents = Vec::new();
        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            let document: Value = serde_json::from_str(line)?;
            if filter.matches(&document) {
                documents.push(document);
            }
        }
        Ok(documents)
    }

    async fn collections(&self) -> StoreResult<Vec<String>> {
        let mut entries = fs::read_dir(&self.dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_documents_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();

        let id = {
            let store = FileStore::open(dir.path()).await.unwrap();
            store
                .create("project", json!({"name": "Library Annex"}))
                .await
                .unwrap()
        };

        let reopened = FileStore::open(dir.path()).await.unwrap();
        let found = reopened
            .query("project", &Filter::new().field("id", id.as_str()))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], "Library Annex");
    }

    #[tokio::test]
    async fn test_query_missing_collection_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        assert!(store.query("timesheetentry", &Filter::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_applies_filter_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        for (project, hours) in [("p1", "8"), ("p2", "4"), ("p1", "6")] {
            store
                .create("timesheetentry", json!({"project_id": project, "hours": hours}))
                .await
                .unwrap();
        }

        let found = store
            .query("timesheetentry", &Filter::new().field("project_id", "p1"))
            .await
            .unwrap();
        let hours: Vec<&str> = found.iter().map(|doc| doc["hours"].as_str().unwrap()).collect();
        assert_eq!(hours, vec!["8", "6"]);
    }

    #[tokio::test]
    async fn test_collection_names_cannot_escape_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        let err = store.create("../outside", json!({})).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument { .. }));
    }

    #[tokio::test]
    async fn test_corrupt_line_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("employee.jsonl"), "{not json}\n").unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        let err = store.query("employee", &Filter::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_collections_lists_jsonl_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        store.create("submission", json!({})).await.unwrap();
        store.create("project", json!({})).await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(
            store.collections().await.unwrap(),
            vec!["project".to_string(), "submission".to_string()]
        );
    }
}
