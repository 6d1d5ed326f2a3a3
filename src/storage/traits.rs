//! # Storage Traits
//!
//! Contracts for the two remote collaborators: the document store holding
//! the canonical `menuItems` and `orders` collections, and the identity
//! provider gating access to them. Backends are interchangeable behind
//! these traits; the domain services never see anything more specific.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::models::session::Identity;

/// One stored document: the id assigned by the store plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

/// Failures of remote document operations.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("document {id} not found in {collection}")]
    NotFound { collection: String, id: String },
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed document: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("backend rejected the request: {0}")]
    Backend(String),
}

/// Document-oriented store of record.
///
/// Writes are acknowledged per document; callers apply local state changes
/// only after the returned future resolves successfully (write-through).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in a collection, in store-defined order.
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, RemoteError>;

    /// Adds a document and returns the id the store assigned.
    async fn add_document(&self, collection: &str, fields: Value) -> Result<String, RemoteError>;

    /// Fully replaces the fields of an existing document.
    async fn replace_document(
        &self,
        collection: &str,
        id: &str,
        fields: Value,
    ) -> Result<(), RemoteError>;

    /// Removes a document. Returns whether anything was actually removed;
    /// a missing id is not an error.
    async fn delete_document(&self, collection: &str, id: &str) -> Result<bool, RemoteError>;

    /// All documents whose top-level `field` equals `value`.
    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, RemoteError>;
}

/// Failures of identity operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account already exists for this email")]
    AlreadyExists,
    #[error("password is too weak")]
    WeakSecret,
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// Authentication backend holding the current session identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The identity the provider currently considers signed in, if any.
    async fn current_identity(&self) -> Option<Identity>;

    async fn login(&self, email: &str, secret: &str) -> Result<Identity, AuthError>;

    async fn sign_up(
        &self,
        email: &str,
        secret: &str,
        display_name: &str,
    ) -> Result<Identity, AuthError>;

    async fn logout(&self);
}
