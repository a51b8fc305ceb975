//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! sd-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `SMARTDEAL_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//! - `SMARTDEAL_DB_NAME` (or `DB_NAME`) - optional database name override
//!
//! # Migration Files
//!
//! `crates/api/migrations/`

use secrecy::ExposeSecret;
use thiserror::Error;

use smartdeal_api::config::{ApiConfig, ConfigError};
use smartdeal_api::db::{DocumentStore, PgDocumentStore, StoreError};

/// Errors from the migrate command.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("migrations require a postgres:// database url")]
    NotPostgres,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Run the document store migrations.
///
/// # Errors
///
/// Returns an error if the configuration is missing, the URL is not a
/// `PostgreSQL` URL, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = ApiConfig::from_env()?;

    let url = config.database_url.expose_secret();
    if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
        return Err(MigrationError::NotPostgres);
    }

    tracing::info!("Connecting to database...");
    let store =
        PgDocumentStore::connect(&config.database_url, config.database_name.as_deref()).await?;

    tracing::info!("Running migrations...");
    store.migrate().await?;

    tracing::info!("Migrations complete!");
    store.close().await;
    Ok(())
}
