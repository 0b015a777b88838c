// src/domain/items.rs
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::money::{format_money, Amount, Currency};
use super::bids::Bid;
use super::core::{ItemId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub detail: String,
    pub currency: Currency,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    #[serde(rename = "startingPrice")]
    pub starting_price: Amount,
    #[serde(rename = "secondaryImage", default, skip_serializing_if = "Option::is_none")]
    pub secondary_image: Option<String>,
    /// Ordered by bid index, oldest first.
    #[serde(default)]
    pub bids: Vec<Bid>,
}

impl Item {
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_time
    }
}

/// Summary of an item's bidding so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemStatus {
    /// Highest bid, or the starting price while nobody has bid.
    pub amount: Amount,
    /// Number of bids placed.
    pub bids: usize,
    /// Bidder holding the highest bid.
    pub winner: Option<UserId>,
}

pub fn item_status(item: &Item) -> ItemStatus {
    // Earliest bid wins a tie
    let highest = item
        .bids
        .iter()
        .fold(None::<&Bid>, |best, bid| match best {
            Some(current) if current.amount >= bid.amount => Some(current),
            _ => Some(bid),
        });

    match highest {
        Some(bid) => ItemStatus {
            amount: bid.amount,
            bids: item.bids.len(),
            winner: Some(bid.uid.clone()),
        },
        None => ItemStatus {
            amount: item.starting_price,
            bids: 0,
            winner: None,
        },
    }
}

/// Smallest amount the next bid may offer.
pub fn min_bid(item: &Item, min_increase: Amount) -> Amount {
    item_status(item).amount + min_increase
}

/// Label shown next to the bid input, e.g. `£13.00`.
pub fn min_bid_label(item: &Item, min_increase: Amount) -> String {
    format_money(item.currency, min_bid(item, min_increase))
}

/// Field name of bid `index` (1-based) for `item_id` inside `auction/items`.
pub fn bid_field(item_id: ItemId, index: usize) -> String {
    format!("item{:05}_bid{:05}", item_id, index)
}

/// Inverse of [`bid_field`].
pub fn parse_bid_field(field: &str) -> Option<(ItemId, usize)> {
    let rest = field.strip_prefix("item")?;
    let (item, index) = rest.split_once("_bid")?;
    Some((item.parse().ok()?, index.parse().ok()?))
}

/// Returns `item` with its bid history rebuilt from the `auction/items` document.
pub fn with_bids(item: &Item, document: &Map<String, Value>) -> Item {
    let mut indexed: Vec<(usize, Bid)> = document
        .iter()
        .filter_map(|(field, value)| {
            let (item_id, index) = parse_bid_field(field)?;
            if item_id != item.id {
                return None;
            }
            match serde_json::from_value::<Bid>(value.clone()) {
                Ok(bid) => Some((index, bid)),
                Err(e) => {
                    warn!("Skipping malformed bid field {}: {}", field, e);
                    None
                }
            }
        })
        .collect();
    indexed.sort_by_key(|(index, _)| *index);

    Item {
        bids: indexed.into_iter().map(|(_, bid)| bid).collect(),
        ..item.clone()
    }
}
