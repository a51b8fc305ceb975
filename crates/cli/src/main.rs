//! SmartDeal Hub CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the document tables
//! sd-cli migrate
//!
//! # Load the demo catalog into an empty store
//! sd-cli seed
//!
//! # Print the admin analytics snapshot as JSON
//! sd-cli analytics
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the product catalog with demo phones
//! - `analytics` - Print usage analytics

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sd-cli")]
#[command(author, version, about = "SmartDeal Hub CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the product catalog with demo data
    Seed,
    /// Print the analytics snapshot
    Analytics {
        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::products().await?,
        Commands::Analytics { pretty } => commands::analytics::print(pretty).await?,
    }
    Ok(())
}
