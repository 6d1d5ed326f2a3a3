//! Closed error types for the domain services.
//!
//! Each component surfaces its own enum so callers can match on failure
//! kinds exhaustively instead of string-matching messages.

use thiserror::Error;

use crate::storage::traits::{AuthError, RemoteError};

/// Input problems caught before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a name is required")]
    EmptyName,
    #[error("price must be greater than zero")]
    NonPositivePrice,
    #[error("select at least one item before submitting")]
    EmptyOrder,
}

/// Failures of menu catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no menu item with id {0}")]
    UnknownItem(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Failures of order store operations.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Failures surfaced by the application façade.
#[derive(Debug, Error)]
pub enum AppError {
    /// The identity provider has not reported its first state yet.
    #[error("session is still loading")]
    SessionLoading,
    #[error("not signed in")]
    AccessDenied,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Order(#[from] OrderError),
}
