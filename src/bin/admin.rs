//! CLI administration tool for snaplink.
//!
//! Talks to the configured link store directly, without going through the
//! HTTP API. Uses the same environment variables as the server.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # List all links with click counts
//! cargo run --bin admin -- list
//!
//! # Show one link
//! cargo run --bin admin -- show Xk7pQ2m
//!
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Check store connectivity
//! cargo run --bin admin -- db check
//! ```

use snaplink::application::services::RedirectService;
use snaplink::config::{self, StoreBackend};
use snaplink::domain::entities::LinkRecord;
use snaplink::server::{build_service, connect_store};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// The URL to shorten, stored verbatim
        url: String,
    },

    /// List all links, newest first
    List,

    /// Show analytics for one link (does not count as a click)
    Show {
        /// Short code
        code: String,
    },

    /// Show totals
    Stats,

    /// Store operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
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
            "Warning: STORE_BACKEND=memory, changes vanish when this command exits".yellow()
        );
    }

    let store = connect_store(&config)
        .await
        .context("Failed to connect to link store")?;
    let service = build_service(&config, store);

    match cli.command {
        Commands::Shorten { url } => shorten(&service, &url).await?,
        Commands::List => list(&service).await?,
        Commands::Show { code } => show(&service, &code).await?,
        Commands::Stats => stats(&service).await?,
        Commands::Db { action } => match action {
            DbAction::Check => db_check(&service, config.store_backend).await?,
        },
    }

    Ok(())
}

async fn shorten(service: &RedirectService, url: &str) -> Result<()> {
    let record = service
        .shorten(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", "Short link created".green().bold());
    println!("  Code: {}", record.short_code.bright_yellow().bold());
    println!("  URL:  {}", record.original_url.cyan());

    Ok(())
}

/// Prints every link as a table.
///
/// ```text
///   Code           Clicks   Created            URL
///   ──────────────────────────────────────────────────────────────
///   Xk7pQ2m        12       2026-01-15 10:30   https://example.com
/// ```
async fn list(service: &RedirectService) -> Result<()> {
    let records = service
        .get_all_analytics()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<14} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for record in &records {
        print_row(record);
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );

    Ok(())
}

fn print_row(record: &LinkRecord) {
    println!(
        "  {:<14} {:<8} {:<18} {}",
        record.short_code.cyan(),
        record.clicks.to_string().bright_green(),
        record
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black(),
        record.original_url
    );
}

async fn show(service: &RedirectService, code: &str) -> Result<()> {
    let record = service
        .get_analytics(code)
        .await
        .map_err(|e| anyhow::anyhow!("Store error: {}", e))?
        .with_context(|| format!("Short code '{}' not found", code))?;

    println!("  Code:    {}", record.short_code.bright_yellow().bold());
    println!("  URL:     {}", record.original_url.cyan());
    println!(
        "  Clicks:  {}",
        record.clicks.to_string().bright_green().bold()
    );
    println!("  Created: {}", record.created_at.to_rfc3339());

    Ok(())
}

async fn stats(service: &RedirectService) -> Result<()> {
    let records = service
        .get_all_analytics()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load links: {}", e))?;

    let clicks: u64 = records.iter().map(|r| r.clicks).sum();

    println!(
        "  Links:  {}",
        records.len().to_string().bright_green().bold()
    );
    println!("  Clicks: {}", clicks.to_string().bright_green().bold());

    Ok(())
}

async fn db_check(service: &RedirectService, backend: StoreBackend) -> Result<()> {
    println!("{}", format!("Checking {} store...", backend).bright_blue());

    if service.store_healthy().await {
        println!("{}", "Store connection OK".green().bold());
        Ok(())
    } else {
        anyhow::bail!("{} store did not answer", backend)
    }
}
