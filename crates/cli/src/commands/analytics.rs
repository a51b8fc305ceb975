//! Print the admin analytics snapshot.

use std::io::Write;

use smartdeal_api::config::ApiConfig;
use smartdeal_api::db;
use smartdeal_api::services::AnalyticsService;

/// Compute the analytics snapshot and write it to stdout as JSON.
///
/// # Errors
///
/// Returns an error if configuration is missing, the store query fails or
/// stdout cannot be written.
pub async fn print(pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env()?;
    let store = db::connect(&config.database_url, config.database_name.as_deref()).await?;

    let analytics = AnalyticsService::new(store.as_ref()).snapshot().await?;
    store.close().await;

    let json = if pretty {
        serde_json::to_string_pretty(&analytics)?
    } else {
        serde_json::to_string(&analytics)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
