use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use serde_json::from_reader;
use thiserror::Error;
use crate::domain::{Catalog, Item, ItemId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to access catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Item listed twice: {0}")]
    DuplicateItem(ItemId),
}

/// Reads the item listings from a JSON array of items.
pub fn read_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let items: Vec<Item> = from_reader(reader)?;

    let mut catalog = Catalog::new();
    for item in items {
        let id = item.id;
        if catalog.insert(id, item).is_some() {
            return Err(CatalogError::DuplicateItem(id));
        }
    }

    Ok(catalog)
}
