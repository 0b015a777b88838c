#![allow(dead_code)]
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use marketplace_auction::backend::{
    AuthService, BackendError, Document, DocumentStore, MemoryAuthService, MemoryDocumentStore,
};
use marketplace_auction::domain::{AuthUser, Bid, Catalog, Item, ItemId};
use marketplace_auction::marketplace::Marketplace;
use marketplace_auction::money::{Amount, Currency};
use std::sync::{Arc, Mutex};
// See https://users.rust-lang.org/t/sharing-code-and-macros-in-tests-directory/3098/7

// Sample data for tests
pub fn sample_item_id() -> ItemId {
    1
}

pub fn sample_ends_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 2, 1, 8, 28, 0).unwrap()
}

pub fn sample_bid_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 1, 15, 8, 28, 0).unwrap()
}

pub fn far_future() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap()
}

pub fn units(value: i64) -> Amount {
    Amount::from_units(value)
}

pub fn sample_item() -> Item {
    Item {
        id: sample_item_id(),
        title: "auction".to_string(),
        detail: "A sample item".to_string(),
        currency: Currency::GBP,
        end_time: sample_ends_at(),
        starting_price: units(10),
        secondary_image: None,
        bids: Vec::new(),
    }
}

pub fn open_item() -> Item {
    Item {
        end_time: far_future(),
        ..sample_item()
    }
}

pub fn second_item() -> Item {
    Item {
        id: 2,
        title: "second auction".to_string(),
        currency: Currency::USD,
        starting_price: units(25),
        secondary_image: Some("second_back".to_string()),
        ..sample_item()
    }
}

pub fn item_with_bids(bids: Vec<Bid>) -> Item {
    Item { bids, ..sample_item() }
}

pub fn catalog_of(items: Vec<Item>) -> Catalog {
    items.into_iter().map(|item| (item.id, item)).collect()
}

pub fn sample_catalog() -> Catalog {
    catalog_of(vec![sample_item(), second_item()])
}

pub fn bid(amount: Amount, uid: &str) -> Bid {
    Bid {
        amount,
        uid: uid.to_string(),
    }
}

pub fn buyer_1() -> AuthUser {
    AuthUser {
        uid: "Buyer_1".to_string(),
        email: "buyer1@example.com".to_string(),
        display_name: Some("Buyer 1".to_string()),
    }
}

pub fn buyer_2() -> AuthUser {
    AuthUser {
        uid: "Buyer_2".to_string(),
        email: "buyer2@example.com".to_string(),
        display_name: Some("Buyer 2".to_string()),
    }
}

pub fn nameless_buyer() -> AuthUser {
    AuthUser {
        uid: "Nameless".to_string(),
        email: "nameless@example.com".to_string(),
        display_name: None,
    }
}

pub struct Backends {
    pub marketplace: Arc<Marketplace>,
    pub store: MemoryDocumentStore,
    pub auth: MemoryAuthService,
}

/// Marketplace over in-memory backends, with `auction/items` created.
pub async fn marketplace_for(catalog: Catalog) -> Backends {
    let store = MemoryDocumentStore::new();
    let auth = MemoryAuthService::new();
    let marketplace = Marketplace::new(catalog, Arc::new(store.clone()), Arc::new(auth.clone()));
    marketplace.initialize().await.unwrap();
    Backends {
        marketplace: Arc::new(marketplace),
        store,
        auth,
    }
}

pub async fn sample_marketplace() -> Backends {
    marketplace_for(sample_catalog()).await
}

pub type Calls = Arc<Mutex<Vec<String>>>;

pub fn recorded(calls: &Calls) -> Vec<String> {
    calls.lock().unwrap().clone()
}

/// Auth service that notes each call before delegating.
pub struct RecordingAuth {
    pub inner: MemoryAuthService,
    pub calls: Calls,
}

#[async_trait]
impl AuthService for RecordingAuth {
    async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        self.calls.lock().unwrap().push("create_account".to_string());
        self.inner.create_account(email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        self.calls.lock().unwrap().push("sign_in".to_string());
        self.inner.sign_in(email, password).await
    }

    async fn update_profile(&self, uid: &str, display_name: &str) -> Result<AuthUser, BackendError> {
        self.calls.lock().unwrap().push("update_profile".to_string());
        self.inner.update_profile(uid, display_name).await
    }

    async fn current_user(&self, uid: &str) -> Result<Option<AuthUser>, BackendError> {
        self.inner.current_user(uid).await
    }
}

/// Document store that notes each write before delegating.
pub struct RecordingStore {
    pub inner: MemoryDocumentStore,
    pub calls: Calls,
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, BackendError> {
        self.inner.get_document(collection, id).await
    }

    async fn set_document(&self, collection: &str, id: &str, document: Document) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(format!("set_document {}", collection));
        self.inner.set_document(collection, id, document).await
    }

    async fn update_document(&self, collection: &str, id: &str, fields: Document) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(format!("update_document {}", collection));
        self.inner.update_document(collection, id, fields).await
    }
}

pub struct RecordingBackends {
    pub marketplace: Marketplace,
    pub store: MemoryDocumentStore,
    pub auth: MemoryAuthService,
    pub calls: Calls,
}

/// Marketplace whose backend calls are logged in order. The log starts empty.
pub async fn recording_marketplace() -> RecordingBackends {
    let store = MemoryDocumentStore::new();
    let auth = MemoryAuthService::new();
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let marketplace = Marketplace::new(
        sample_catalog(),
        Arc::new(RecordingStore {
            inner: store.clone(),
            calls: Arc::clone(&calls),
        }),
        Arc::new(RecordingAuth {
            inner: auth.clone(),
            calls: Arc::clone(&calls),
        }),
    );
    marketplace.initialize().await.unwrap();
    calls.lock().unwrap().clear();
    RecordingBackends {
        marketplace,
        store,
        auth,
        calls,
    }
}

/// Account with the given display name, created straight through the auth service.
pub async fn registered(auth: &MemoryAuthService, email: &str, name: Option<&str>) -> AuthUser {
    let user = auth.create_account(email, "secret1").await.unwrap();
    match name {
        Some(name) => auth.update_profile(&user.uid, name).await.unwrap(),
        None => user,
    }
}
