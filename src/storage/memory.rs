//! In-process storage backends.
//!
//! [`MemoryStore`] and [`MemoryIdentityProvider`] back the local
//! (non-hosted) variant of the application and the test suites. Both keep
//! everything in process memory and impose the same contract rules the
//! hosted backend does.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use uuid::Uuid;

use super::traits::{AuthError, Document, DocumentStore, IdentityProvider, RemoteError};
use crate::domain::models::session::Identity;

/// Document store holding collections in memory, preserving insertion
/// order within each collection.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, RemoteError> {
        Ok(self
            .collections
            .lock()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_document(&self, collection: &str, fields: Value) -> Result<String, RemoteError> {
        let id = Uuid::new_v4().to_string();
        self.collections
            .lock()
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        Ok(id)
    }

    async fn replace_document(
        &self,
        collection: &str,
        id: &str,
        fields: Value,
    ) -> Result<(), RemoteError> {
        let mut collections = self.collections.lock();
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| RemoteError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        let document = documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or_else(|| RemoteError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        document.fields = fields;
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<bool, RemoteError> {
        let mut collections = self.collections.lock();
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        Ok(documents.len() < before)
    }

    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, RemoteError> {
        Ok(self
            .collections
            .lock()
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| doc.fields.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

struct Account {
    user_id: String,
    secret: String,
    display_name: String,
}

/// Identity provider keeping accounts in memory.
///
/// Applies the hosted provider's signup rules: duplicate emails are
/// rejected and secrets shorter than six characters are considered weak.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    current: Mutex<Option<Identity>>,
}

const MIN_SECRET_LEN: usize = 6;

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-registers an account without signing it in.
    pub fn with_account(self, email: &str, secret: &str, display_name: &str) -> Self {
        self.accounts.lock().insert(
            email.to_string(),
            Account {
                user_id: Uuid::new_v4().to_string(),
                secret: secret.to_string(),
                display_name: display_name.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn current_identity(&self) -> Option<Identity> {
        self.current.lock().clone()
    }

    async fn login(&self, email: &str, secret: &str) -> Result<Identity, AuthError> {
        let accounts = self.accounts.lock();
        let account = accounts.get(email).ok_or(AuthError::InvalidCredentials)?;
        if account.secret != secret {
            return Err(AuthError::InvalidCredentials);
        }
        let identity = Identity {
            user_id: account.user_id.clone(),
            email: email.to_string(),
            display_name: account.display_name.clone(),
        };
        *self.current.lock() = Some(identity.clone());
        Ok(identity)
    }

    async fn sign_up(
        &self,
        email: &str,
        secret: &str,
        display_name: &str,
    ) -> Result<Identity, AuthError> {
        if secret.chars().count() < MIN_SECRET_LEN {
            return Err(AuthError::WeakSecret);
        }
        let mut accounts = self.accounts.lock();
        if accounts.contains_key(email) {
            return Err(AuthError::AlreadyExists);
        }
        let account = Account {
            user_id: Uuid::new_v4().to_string(),
            secret: secret.to_string(),
            display_name: display_name.to_string(),
        };
        let identity = Identity {
            user_id: account.user_id.clone(),
            email: email.to_string(),
            display_name: display_name.to_string(),
        };
        accounts.insert(email.to_string(), account);
        *self.current.lock() = Some(identity.clone());
        Ok(identity)
    }

    async fn logout(&self) {
        *self.current.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_assigns_unique_ids_and_preserves_order() {
        let store = MemoryStore::new();
        let first = store
            .add_document("menuItems", json!({"name": "Soup"}))
            .await
            .expect("add should succeed");
        let second = store
            .add_document("menuItems", json!({"name": "Salad"}))
            .await
            .expect("add should succeed");
        assert_ne!(first, second);

        let documents = store.list_documents("menuItems").await.expect("list");
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id, first);
        assert_eq!(documents[1].id, second);
    }

    #[tokio::test]
    async fn test_replace_missing_document_is_not_found() {
        let store = MemoryStore::new();
        let result = store
            .replace_document("orders", "nope", json!({}))
            .await;
        assert!(matches!(result, Err(RemoteError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_document_is_noop() {
        let store = MemoryStore::new();
        let removed = store
            .delete_document("orders", "nope")
            .await
            .expect("delete should not error");
        assert!(!removed);
    }

    #[tokio::test]
    async fn test_query_by_field_matches_exact_value() {
        let store = MemoryStore::new();
        store
            .add_document("orders", json!({"userId": "u1", "employeeName": "Alice"}))
            .await
            .expect("add");
        store
            .add_document("orders", json!({"userId": "u2", "employeeName": "Bob"}))
            .await
            .expect("add");

        let matches = store
            .query_by_field("orders", "userId", &json!("u1"))
            .await
            .expect("query");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].fields["employeeName"], json!("Alice"));
    }

    #[tokio::test]
    async fn test_signup_rules_and_login_round_trip() {
        let provider = MemoryIdentityProvider::new();

        let weak = provider.sign_up("a@team.test", "123", "Ann").await;
        assert_eq!(weak, Err(AuthError::WeakSecret));

        let identity = provider
            .sign_up("a@team.test", "secret1", "Ann")
            .await
            .expect("signup should succeed");
        assert_eq!(provider.current_identity().await, Some(identity.clone()));

        let duplicate = provider.sign_up("a@team.test", "secret2", "Ann").await;
        assert_eq!(duplicate, Err(AuthError::AlreadyExists));

        provider.logout().await;
        assert_eq!(provider.current_identity().await, None);

        let wrong = provider.login("a@team.test", "nope12").await;
        assert_eq!(wrong, Err(AuthError::InvalidCredentials));

        let back = provider
            .login("a@team.test", "secret1")
            .await
            .expect("login should succeed");
        assert_eq!(back, identity);
    }
}
