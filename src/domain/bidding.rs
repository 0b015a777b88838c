// src/domain/bidding.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;
use crate::money::{is_monetary, Amount};
use super::bids::Bid;
use super::core::{BidRejection, ItemId};
use super::items::{bid_field, item_status, Item};
use super::users::AuthUser;

/// Minimum amount a new bid must exceed the highest bid by.
pub fn default_min_increase() -> Amount {
    Amount::from_units(1)
}

/// A bid that passed validation and is ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedBid {
    #[serde(rename = "itemId")]
    pub item_id: ItemId,
    /// 1-based position in the item's bid history.
    pub index: usize,
    pub bid: Bid,
}

impl PlacedBid {
    pub fn field(&self) -> String {
        bid_field(self.item_id, self.index)
    }
}

/// Checks a bid against the item, stopping at the first failure:
/// ended item, missing username, malformed amount, amount too low.
pub fn validate_bid(
    item: &Item,
    bid_text: &str,
    user: &AuthUser,
    now: DateTime<Utc>,
    min_increase: Amount,
) -> Result<PlacedBid, BidRejection> {
    if item.has_ended(now) {
        return Err(BidRejection::ItemEnded(item.id));
    }

    if user.username().is_none() {
        return Err(BidRejection::UsernameRequired);
    }

    if !is_monetary(bid_text) {
        return Err(BidRejection::InvalidAmount(bid_text.to_string()));
    }
    // Digits beyond i64 range are no more a valid amount than letters are
    let amount = Amount::from_str(bid_text)
        .map_err(|_| BidRejection::InvalidAmount(bid_text.to_string()))?;

    let status = item_status(item);
    let minimum = status.amount + min_increase;
    if amount < minimum {
        return Err(BidRejection::BidTooLow { minimum });
    }

    Ok(PlacedBid {
        item_id: item.id,
        index: status.bids + 1,
        bid: Bid {
            amount,
            uid: user.uid.clone(),
        },
    })
}
