//! Seed the product catalog with the demo phones.
//!
//! Does nothing when the catalog already has products.

use smartdeal_api::config::ApiConfig;
use smartdeal_api::db;
use smartdeal_api::services::SeedService;

/// Seed demo products.
///
/// # Errors
///
/// Returns an error if configuration is missing or store operations fail.
pub async fn products() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env()?;
    let store = db::connect(&config.database_url, config.database_name.as_deref()).await?;

    let outcome = SeedService::new(store.as_ref()).seed_products().await?;
    tracing::info!(result = %outcome.message(), "Seed finished");

    store.close().await;
    Ok(())
}
