// src/backend/memory.rs
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;
use crate::domain::{AuthUser, UserId, MIN_PASSWORD_LENGTH};
use super::{AuthService, BackendError, Document, DocumentStore};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, BackendError> {
    mutex
        .lock()
        .map_err(|_| BackendError::new("internal", "backend state lock poisoned"))
}

type DocumentKey = (String, String);

/// Document database kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<Mutex<HashMap<DocumentKey, Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(collection: &str, id: &str) -> DocumentKey {
    (collection.to_string(), id.to_string())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, BackendError> {
        let documents = lock(&self.documents)?;
        Ok(documents.get(&key(collection, id)).cloned())
    }

    async fn set_document(&self, collection: &str, id: &str, document: Document) -> Result<(), BackendError> {
        let mut documents = lock(&self.documents)?;
        documents.insert(key(collection, id), document);
        debug!("set_document() {}/{}", collection, id);
        Ok(())
    }

    async fn update_document(&self, collection: &str, id: &str, fields: Document) -> Result<(), BackendError> {
        let mut documents = lock(&self.documents)?;
        match documents.get_mut(&key(collection, id)) {
            Some(document) => {
                document.extend(fields);
                Ok(())
            }
            None => Err(BackendError::new(
                "not-found",
                format!("No document to update: {}/{}", collection, id),
            )),
        }
    }
}

#[derive(Debug, Clone)]
struct Account {
    user: AuthUser,
    password: String,
}

/// Email/password accounts kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuthService {
    accounts: Arc<Mutex<HashMap<UserId, Account>>>,
}

impl MemoryAuthService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthService for MemoryAuthService {
    async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        let mut accounts = lock(&self.accounts)?;
        if accounts.values().any(|account| account.user.email == email) {
            return Err(BackendError::new(
                "auth/email-already-in-use",
                "The email address is already in use by another account.",
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(BackendError::new(
                "auth/weak-password",
                "Password should be at least 6 characters.",
            ));
        }

        let user = AuthUser {
            uid: Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
            display_name: None,
        };
        accounts.insert(
            user.uid.clone(),
            Account {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        let accounts = lock(&self.accounts)?;
        accounts
            .values()
            .find(|account| account.user.email == email && account.password == password)
            .map(|account| account.user.clone())
            .ok_or_else(|| BackendError::new("auth/invalid-credential", "Invalid email or password."))
    }

    async fn update_profile(&self, uid: &str, display_name: &str) -> Result<AuthUser, BackendError> {
        let mut accounts = lock(&self.accounts)?;
        let account = accounts
            .get_mut(uid)
            .ok_or_else(|| BackendError::new("auth/user-not-found", format!("No account for {}", uid)))?;
        account.user.display_name = Some(display_name.to_string());
        Ok(account.user.clone())
    }

    async fn current_user(&self, uid: &str) -> Result<Option<AuthUser>, BackendError> {
        let accounts = lock(&self.accounts)?;
        Ok(accounts.get(uid).map(|account| account.user.clone()))
    }
}
