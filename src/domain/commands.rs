// src/domain/commands.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use super::bidding::PlacedBid;
use super::users::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "$type")]
pub enum CommandSuccess {
    #[serde(rename = "BidAccepted")]
    BidAccepted {
        at: DateTime<Utc>,
        #[serde(flatten)]
        bid: PlacedBid,
    },

    #[serde(rename = "SignedUp")]
    SignedUp {
        at: DateTime<Utc>,
        user: User,
    },
}
