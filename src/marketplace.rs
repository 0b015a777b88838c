// src/marketplace.rs
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::backend::{
    AuthService, BackendError, Document, DocumentStore, AUCTION_COLLECTION, ITEMS_DOCUMENT,
    USERS_COLLECTION,
};
use crate::domain::{
    default_min_increase, items, min_bid_label, validate_bid, validate_sign_up, with_bids,
    AuthUser, BidRejection, Catalog, CommandSuccess, InvalidFields, Item, ItemId, User,
    UserProfile,
};
use crate::money::Amount;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitBidError {
    #[error("{0}")]
    Rejected(#[from] BidRejection),

    #[error("Could not place bid: {0}")]
    Backend(#[from] BackendError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignUpError {
    #[error("{0}")]
    InvalidFields(#[from] InvalidFields),

    #[error("Error signing up: {0}")]
    Backend(#[from] BackendError),
}

/// Item listings combined with the bid document and the account service.
pub struct Marketplace {
    catalog: Catalog,
    store: Arc<dyn DocumentStore>,
    auth: Arc<dyn AuthService>,
    min_increase: Amount,
}

impl Marketplace {
    pub fn new(catalog: Catalog, store: Arc<dyn DocumentStore>, auth: Arc<dyn AuthService>) -> Self {
        Marketplace {
            catalog,
            store,
            auth,
            min_increase: default_min_increase(),
        }
    }

    pub fn with_min_increase(mut self, min_increase: Amount) -> Self {
        self.min_increase = min_increase;
        self
    }

    pub fn min_increase(&self) -> Amount {
        self.min_increase
    }

    /// Creates the empty `auction/items` document if it does not exist yet.
    pub async fn initialize(&self) -> Result<(), BackendError> {
        if self.store.get_document(AUCTION_COLLECTION, ITEMS_DOCUMENT).await?.is_none() {
            self.store
                .set_document(AUCTION_COLLECTION, ITEMS_DOCUMENT, Document::new())
                .await?;
            info!("Created {}/{}", AUCTION_COLLECTION, ITEMS_DOCUMENT);
        }
        Ok(())
    }

    async fn bid_document(&self) -> Result<Document, BackendError> {
        Ok(self
            .store
            .get_document(AUCTION_COLLECTION, ITEMS_DOCUMENT)
            .await?
            .unwrap_or_default())
    }

    /// Every listed item with its current bid history.
    pub async fn items(&self) -> Result<Vec<Item>, BackendError> {
        let document = self.bid_document().await?;
        Ok(items(&self.catalog)
            .iter()
            .map(|item| with_bids(item, &document))
            .collect())
    }

    pub async fn item(&self, item_id: ItemId) -> Result<Option<Item>, BackendError> {
        match self.catalog.get(&item_id) {
            Some(item) => {
                let document = self.bid_document().await?;
                Ok(Some(with_bids(item, &document)))
            }
            None => Ok(None),
        }
    }

    pub fn min_bid_label(&self, item: &Item) -> String {
        min_bid_label(item, self.min_increase)
    }

    pub async fn current_user(&self, uid: &str) -> Result<Option<AuthUser>, BackendError> {
        self.auth.current_user(uid).await
    }

    /// Validates `bid_text` against the item's latest state and, if it
    /// passes, writes it as the item's next bid.
    pub async fn submit_bid(
        &self,
        item_id: ItemId,
        bid_text: &str,
        user: &AuthUser,
        now: DateTime<Utc>,
    ) -> Result<CommandSuccess, SubmitBidError> {
        let item = self
            .item(item_id)
            .await?
            .ok_or(BidRejection::UnknownItem(item_id))?;

        let placed = validate_bid(&item, bid_text, user, now, self.min_increase)?;

        let bid = serde_json::to_value(&placed.bid)
            .map_err(|e| BackendError::new("internal", e.to_string()))?;
        let mut fields = Document::new();
        fields.insert(placed.field(), bid);
        if let Err(e) = self
            .store
            .update_document(AUCTION_COLLECTION, ITEMS_DOCUMENT, fields)
            .await
        {
            error!("submit_bid() write to {}/{} failed: {}", AUCTION_COLLECTION, ITEMS_DOCUMENT, e);
            return Err(SubmitBidError::Backend(e));
        }
        debug!("submit_bid() write to {}/{}", AUCTION_COLLECTION, ITEMS_DOCUMENT);

        Ok(CommandSuccess::BidAccepted { at: now, bid: placed })
    }

    /// Creates the account, sets its display name and writes its profile, in that order.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<CommandSuccess, SignUpError> {
        validate_sign_up(email, password, username)?;

        match self.create_user(email, password, username).await {
            Ok(user) => {
                debug!("sign_up: User signed up successfully.");
                Ok(CommandSuccess::SignedUp { at: now, user })
            }
            Err(e) => {
                error!("sign_up: Error signing up: {}", e);
                Err(SignUpError::Backend(e))
            }
        }
    }

    async fn create_user(&self, email: &str, password: &str, username: &str) -> Result<User, BackendError> {
        let account = self.auth.create_account(email, password).await?;
        let account = self.auth.update_profile(&account.uid, username).await?;

        let profile = UserProfile::new(username);
        let document = match serde_json::to_value(&profile) {
            Ok(Value::Object(document)) => document,
            _ => return Err(BackendError::new("internal", "profile is not a document")),
        };
        self.store
            .set_document(USERS_COLLECTION, &account.uid, document)
            .await?;

        Ok(User {
            uid: account.uid,
            display_name: account.display_name,
            admin: profile.admin,
        })
    }

    /// Signs in and looks up whether the profile carries admin rights.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, BackendError> {
        let account = self.auth.sign_in(email, password).await.map_err(|e| {
            error!("sign_in: {}", e);
            e
        })?;

        let profile = self
            .store
            .get_document(USERS_COLLECTION, &account.uid)
            .await?
            .and_then(|document| serde_json::from_value::<UserProfile>(Value::Object(document)).ok());
        let admin = profile.map(|profile| profile.admin).unwrap_or(false);
        if admin {
            debug!("User is admin");
        }

        Ok(User {
            uid: account.uid,
            display_name: account.display_name,
            admin,
        })
    }
}
