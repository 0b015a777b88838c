use log::{error, info};
use std::sync::Arc;

use marketplace_auction::backend::{MemoryAuthService, MemoryDocumentStore};
use marketplace_auction::config::Config;
use marketplace_auction::marketplace::Marketplace;
use marketplace_auction::persistence::json_file::read_catalog;
use marketplace_auction::web::app::run_app;

fn other_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,actix_web=info"))
        .init();

    let config = Config::load().map_err(|e| other_error(e.to_string()))?;

    let catalog = read_catalog(&config.items_file).map_err(|e| {
        error!("Could not load {}: {}", config.items_file.display(), e);
        other_error(e.to_string())
    })?;
    info!("Loaded {} items from {}", catalog.len(), config.items_file.display());

    let marketplace = Marketplace::new(
        catalog,
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(MemoryAuthService::new()),
    )
    .with_min_increase(config.min_increase);
    marketplace
        .initialize()
        .await
        .map_err(|e| other_error(e.to_string()))?;

    run_app(&config, Arc::new(marketplace)).await
}
