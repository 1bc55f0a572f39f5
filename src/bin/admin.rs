//! CLI administration tool for link-shortener.
//!
//! Works directly against the configured link store, without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Create a link with a generated code
//! cargo run --bin admin -- link create https://example.com
//!
//! # Create a link with a custom slug
//! cargo run --bin admin -- link create https://example.com --slug promo
//!
//! # Look up a code
//! cargo run --bin admin -- link get promo
//!
//! # Check the store connection
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `STORE_BACKEND`, `REDIS_URL`, `DATABASE_URL`, ...
//! The `memory` backend only lives for one invocation, so it is of little use here.
//!
//! Links are immutable: there is no command that changes or removes a stored mapping.

use link_shortener::config::{self, Config, StoreBackend};
use link_shortener::domain::repositories::LinkStore;
use link_shortener::infrastructure::persistence::connect_store;
use link_shortener::prelude::LinkService;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::io::Write;
use std::sync::Arc;

/// CLI tool for managing link-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Link store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// Destination URL
        long_url: String,

        /// Custom short code (generated if omitted)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Show the URL stored under a code
    Get {
        /// Short code
        code: String,
    },
}

/// Store subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.store_backend == StoreBackend::Memory {
        println!(
            "{}",
            "⚠️  STORE_BACKEND is 'memory': changes are discarded on exit".yellow()
        );
    }

    let store = connect_store(&config)
        .await
        .context("Failed to open link store")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, store, &config).await?,
        Commands::Store { action } => handle_store_action(action, store, &config).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(
    action: LinkAction,
    store: Arc<dyn LinkStore>,
    config: &Config,
) -> Result<()> {
    match action {
        LinkAction::Create { long_url, slug } => {
            let service = LinkService::new(store, config.code_max_attempts);
            create_link(&service, long_url, slug).await?;
        }
        LinkAction::Get { code } => get_link(store.as_ref(), &code).await?,
    }

    Ok(())
}

/// Creates a link through the same service the HTTP API uses.
async fn create_link(service: &LinkService, long_url: String, slug: Option<String>) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let link = service
        .create_link(long_url, slug)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("  Code: {}", link.code.bright_yellow().bold());
    println!("  URL:  {}", link.long_url.cyan());
    println!();
    println!("{}", "✅ Link created successfully!".green().bold());

    Ok(())
}

async fn get_link(store: &dyn LinkStore, code: &str) -> Result<()> {
    let long_url = store
        .get(code)
        .await
        .map_err(|e| anyhow::anyhow!("Store error: {}", e))?;

    match long_url {
        Some(url) => println!("  {} → {}", code.bright_yellow(), url.cyan()),
        None => println!("{}", format!("  No link stored under '{code}'").yellow()),
    }

    Ok(())
}

/// Dispatches store commands.
async fn handle_store_action(
    action: StoreAction,
    store: Arc<dyn LinkStore>,
    config: &Config,
) -> Result<()> {
    match action {
        StoreAction::Check => {
            print!("Checking {} store... ", config.store_backend);
            std::io::stdout().flush()?;

            match store.ping().await {
                Ok(()) => println!("{}", "✅ OK".green().bold()),
                Err(e) => {
                    println!("{}", "❌ FAILED".red().bold());
                    anyhow::bail!("Store check failed: {}", e);
                }
            }
        }
    }

    Ok(())
}
