// src/domain/mod.rs
pub mod bidding;
pub mod bids;
pub mod commands;
pub mod core;
pub mod items;
pub mod sign_up;
pub mod users;

use std::collections::BTreeMap;

pub use self::bidding::*;
pub use self::bids::*;
pub use self::commands::*;
pub use self::core::*;
pub use self::items::*;
pub use self::sign_up::*;
pub use self::users::*;

/// Static item listings keyed by id. Bids are kept apart in the document store.
pub type Catalog = BTreeMap<ItemId, Item>;

pub fn items(catalog: &Catalog) -> Vec<Item> {
    catalog.values().cloned().collect()
}
