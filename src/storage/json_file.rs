//! File-backed document store.
//!
//! The persisted local fallback: one JSON file per collection under a base
//! directory, read before and rewritten after every mutation. This is the
//! storage used when the app runs without the hosted backend.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::traits::{Document, DocumentStore, RemoteError};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredDocument {
    id: String,
    fields: Value,
}

pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `base_dir`, creating the directory if it
    /// does not exist yet.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, RemoteError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir)?;
            info!("Created document store directory {:?}", base_dir);
        }
        Ok(Self { base_dir })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.base_dir.join(format!("{collection}.json"))
    }

    fn read_collection(&self, collection: &str) -> Result<Vec<StoredDocument>, RemoteError> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_collection(
        &self,
        collection: &str,
        documents: &[StoredDocument],
    ) -> Result<(), RemoteError> {
        let path = self.collection_path(collection);
        let contents = serde_json::to_string_pretty(documents)?;
        fs::write(&path, contents)?;
        debug!("Wrote {} documents to {:?}", documents.len(), path);
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, RemoteError> {
        Ok(self
            .read_collection(collection)?
            .into_iter()
            .map(|doc| Document {
                id: doc.id,
                fields: doc.fields,
            })
            .collect())
    }

    async fn add_document(&self, collection: &str, fields: Value) -> Result<String, RemoteError> {
        let mut documents = self.read_collection(collection)?;
        let id = Uuid::new_v4().to_string();
        documents.push(StoredDocument {
            id: id.clone(),
            fields,
        });
        self.write_collection(collection, &documents)?;
        Ok(id)
    }

    async fn replace_document(
        &self,
        collection: &str,
        id: &str,
        fields: Value,
    ) -> Result<(), RemoteError> {
        let mut documents = self.read_collection(collection)?;
        let document = documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or_else(|| RemoteError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        document.fields = fields;
        self.write_collection(collection, &documents)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<bool, RemoteError> {
        let mut documents = self.read_collection(collection)?;
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        if documents.len() == before {
            return Ok(false);
        }
        self.write_collection(collection, &documents)?;
        Ok(true)
    }

    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, RemoteError> {
        Ok(self
            .read_collection(collection)?
            .into_iter()
            .filter(|doc| doc.fields.get(field) == Some(value))
            .map(|doc| Document {
                id: doc.id,
                fields: doc.fields,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup_store() -> (JsonFileStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFileStore::new(temp_dir.path()).expect("Failed to open store");
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_documents_survive_reopening_the_store() {
        let (store, temp_dir) = setup_store();
        let id = store
            .add_document("orders", json!({"employeeName": "Alice"}))
            .await
            .expect("add");

        // A fresh store over the same directory sees the same data.
        let reopened = JsonFileStore::new(temp_dir.path()).expect("reopen");
        let documents = reopened.list_documents("orders").await.expect("list");
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, id);
        assert_eq!(documents[0].fields["employeeName"], json!("Alice"));
    }

    #[tokio::test]
    async fn test_replace_and_delete_rewrite_the_file() {
        let (store, _temp_dir) = setup_store();
        let id = store
            .add_document("menuItems", json!({"name": "Soup", "price": "6.99"}))
            .await
            .expect("add");

        store
            .replace_document("menuItems", &id, json!({"name": "Stew", "price": "7.99"}))
            .await
            .expect("replace");
        let documents = store.list_documents("menuItems").await.expect("list");
        assert_eq!(documents[0].fields["name"], json!("Stew"));

        let removed = store.delete_document("menuItems", &id).await.expect("delete");
        assert!(removed);
        assert!(store
            .list_documents("menuItems")
            .await
            .expect("list")
            .is_empty());
    }

    #[tokio::test]
    async fn test_missing_collection_lists_empty() {
        let (store, _temp_dir) = setup_store();
        let documents = store.list_documents("orders").await.expect("list");
        assert!(documents.is_empty());

        let removed = store.delete_document("orders", "nope").await.expect("delete");
        assert!(!removed);
    }

    #[tokio::test]
    async fn test_query_by_field_reads_from_disk() {
        let (store, _temp_dir) = setup_store();
        store
            .add_document("orders", json!({"userId": "u1"}))
            .await
            .expect("add");
        store
            .add_document("orders", json!({"userId": "u2"}))
            .await
            .expect("add");

        let matches = store
            .query_by_field("orders", "userId", &json!("u2"))
            .await
            .expect("query");
        assert_eq!(matches.len(), 1);
    }
}
