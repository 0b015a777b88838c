// src/domain/core.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::money::Amount;

pub type UserId = String;
pub type ItemId = u32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BidRejection {
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("No item selected")]
    NoActiveItem,

    #[error("Sorry, this item has ended!")]
    ItemEnded(ItemId),

    #[error("You must provide a username before bidding!")]
    UsernameRequired,

    #[error("Please enter a valid monetary amount!")]
    InvalidAmount(String),

    #[error("You did not bid enough!")]
    BidTooLow { minimum: Amount },
}

/// Which sign-up fields failed validation. `true` marks a failing field.
#[derive(Debug, Error, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[error("Invalid sign-up fields: email={email}, password={password}, username={username}")]
pub struct InvalidFields {
    pub email: bool,
    pub password: bool,
    pub username: bool,
}

impl InvalidFields {
    pub fn any(&self) -> bool {
        self.email || self.password || self.username
    }
}
