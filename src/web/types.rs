use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::{item_status, Bid, InvalidFields, Item, ItemId, ItemStatus};
use crate::marketplace::Marketplace;
use crate::money::Currency;
use crate::ui::Validity;

pub type AppState = Arc<Marketplace>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BidRequest {
    pub bid: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Per-field markers returned when sign-up input is rejected.
#[derive(Debug, Serialize)]
pub struct SignUpRejected {
    pub email: Validity,
    pub password: Validity,
    pub username: Validity,
}

impl From<&InvalidFields> for SignUpRejected {
    fn from(invalid: &InvalidFields) -> Self {
        SignUpRejected {
            email: Validity::flagged(invalid.email),
            password: Validity::flagged(invalid.password),
            username: Validity::flagged(invalid.username),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemSummary {
    pub id: ItemId,
    pub title: String,
    pub detail: String,
    pub currency: Currency,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    #[serde(rename = "secondaryImage", skip_serializing_if = "Option::is_none")]
    pub secondary_image: Option<String>,
    pub status: ItemStatus,
    #[serde(rename = "minBid")]
    pub min_bid: String,
}

impl ItemSummary {
    pub fn new(item: &Item, min_bid: String) -> Self {
        ItemSummary {
            id: item.id,
            title: item.title.clone(),
            detail: item.detail.clone(),
            currency: item.currency,
            end_time: item.end_time,
            secondary_image: item.secondary_image.clone(),
            status: item_status(item),
            min_bid,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemDetail {
    #[serde(flatten)]
    pub summary: ItemSummary,

    pub bids: Vec<Bid>,
}
