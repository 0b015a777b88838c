// src/backend/mod.rs
//! Seams to the hosted services the marketplace relies on: a document
//! database and an authentication service. Every call is asynchronous and
//! may fail independently of the others.

pub mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use crate::domain::AuthUser;

pub use self::memory::{MemoryAuthService, MemoryDocumentStore};

pub const AUCTION_COLLECTION: &str = "auction";
pub const ITEMS_DOCUMENT: &str = "items";
pub const USERS_COLLECTION: &str = "users";

pub type Document = Map<String, Value>;

/// Failure reported by an external service, carrying its error code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code} - {message}")]
pub struct BackendError {
    pub code: String,
    pub message: String,
}

impl BackendError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        BackendError {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, BackendError>;

    /// Replaces the whole document, creating it if needed.
    async fn set_document(&self, collection: &str, id: &str, document: Document) -> Result<(), BackendError>;

    /// Merges `fields` into an existing document. Fails if the document is missing.
    async fn update_document(&self, collection: &str, id: &str, fields: Document) -> Result<(), BackendError>;
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser, BackendError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError>;

    async fn update_profile(&self, uid: &str, display_name: &str) -> Result<AuthUser, BackendError>;

    async fn current_user(&self, uid: &str) -> Result<Option<AuthUser>, BackendError>;
}
