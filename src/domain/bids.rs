// src/domain/bids.rs
use serde::{Deserialize, Serialize};
use crate::money::Amount;
use super::core::UserId;

/// One entry of an item's bid history, as stored in `auction/items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub amount: Amount,
    pub uid: UserId,
}
