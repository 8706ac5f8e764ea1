//! CLI administration tool for shorturls.
//!
//! Manages links and inspects the sequence counter directly in PostgreSQL,
//! without going through the HTTP API. It uses the same repositories and
//! encoder settings as the server, so codes created here continue the same
//! sequence.
//!
//! # Usage
//!
//! ```bash
//! # List links (creation order)
//! cargo run --bin admin -- links list --skip 0 --limit 20
//!
//! # Show, create and delete
//! cargo run --bin admin -- links show gB0NV
//! cargo run --bin admin -- links create https://example.com
//! cargo run --bin admin -- links delete gB0NV -y
//!
//! # Last issued counter value
//! cargo run --bin admin -- counter show
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (`DATABASE_URL` or `DB_*`, `HASH_SALT`, `HASH_MIN_LENGTH`,
//! `COUNTER_NAME`, `COUNTER_START`, `BASE_URL`). `AUTH_KEY` is not needed.

use shorturls::config::{Config, MAX_COUNTER_START, MAX_MIN_LENGTH, StorageBackend};
use shorturls::domain::entities::Link;
use shorturls::server::{self, Backends};
use shorturls::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorturls.
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
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Inspect the sequence counter
    Counter {
        #[command(subcommand)]
        action: CounterAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// List links in creation order
    List {
        /// Number of links to skip
        #[arg(short, long, default_value_t = 0)]
        skip: i64,

        /// Maximum number of links (0 = server maximum)
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },

    /// Show a single link
    Show { code: String },

    /// Create a short link
    Create { url: String },

    /// Delete a link
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CounterAction {
    /// Show the last issued value
    Show,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("admin works on PostgreSQL only; unset STORAGE_BACKEND or set it to 'postgres'");
    }
    if config.hash_min_length > MAX_MIN_LENGTH {
        anyhow::bail!("HASH_MIN_LENGTH must be at most {MAX_MIN_LENGTH}");
    }
    if config.counter_start > MAX_COUNTER_START {
        anyhow::bail!("COUNTER_START must be at most {MAX_COUNTER_START}");
    }

    let pool = server::connect_database(&config).await?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &config, pool).await?,
        Commands::Counter { action } => handle_counter_action(action, &config, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn app_state(config: &Config, pool: PgPool) -> Result<AppState> {
    let backends = Backends::postgres(Arc::new(pool), &config.counter_name, config.counter_start);
    server::build_state(config, backends)
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, config: &Config, pool: PgPool) -> Result<()> {
    let state = app_state(config, pool)?;
    let links = &state.link_service;

    match action {
        LinkAction::List { skip, limit } => {
            println!("{}", "📋 Links".bright_blue().bold());
            println!();

            let items = links.list_links(limit, skip).await?;
            let total = links.count_links().await?;

            if items.is_empty() {
                println!("{}", "  No links found".yellow());
                return Ok(());
            }

            println!(
                "  {:<6} {:<12} {:<20} {}",
                "ID".bright_white().bold(),
                "Code".bright_white().bold(),
                "Created".bright_white().bold(),
                "URL".bright_white().bold()
            );
            println!("  {}", "─".repeat(75).bright_black());

            for link in &items {
                print_row(link);
            }

            println!();
            println!(
                "  Showing {} of {}",
                items.len().to_string().bright_white().bold(),
                total.to_string().bright_white().bold()
            );
            println!();
        }
        LinkAction::Show { code } => {
            let link = links.get_link(&code).await?;
            print_details(&link);

            match links.sequence_of(&link.code) {
                Some(value) => println!("  Sequence value: {}", value.to_string().bright_green()),
                None => println!(
                    "{}",
                    "  ⚠️  Code does not decode with the current HASH_SALT / HASH_MIN_LENGTH".yellow()
                ),
            }
            println!();
        }
        LinkAction::Create { url } => {
            let link = links.create_link(&url).await?;

            println!("{}", "✅ Link created".green().bold());
            println!();
            print_details(&link);
        }
        LinkAction::Delete { code, yes } => {
            let link = links.get_link(&code).await?;
            print_details(&link);

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete this link?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let deleted = links.delete_link(&code).await?;
            if deleted == 0 {
                println!("{}", "⚠️  Link was already removed".yellow());
            } else {
                println!("{}", "✅ Link deleted".green().bold());
            }
        }
    }

    Ok(())
}

async fn handle_counter_action(action: CounterAction, config: &Config, pool: PgPool) -> Result<()> {
    let state = app_state(config, pool)?;

    match action {
        CounterAction::Show => {
            let value = state.link_service.current_sequence().await?;

            println!("{}", "🔢 Sequence counter".bright_blue().bold());
            println!();
            println!("  Name:       {}", config.counter_name.cyan());
            println!("  Floor:      {}", config.counter_start.to_string().bright_black());
            println!("  Last value: {}", value.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}

fn print_row(link: &Link) {
    println!(
        "  {:<6} {:<12} {:<20} {}",
        link.id
            .map(|id| id.to_string())
            .unwrap_or_default()
            .bright_black(),
        link.code.cyan(),
        link.created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black(),
        link.long_url
    );
}

fn print_details(link: &Link) {
    println!("  Code:    {}", link.code.cyan().bold());
    println!("  URL:     {}", link.long_url);
    if let Some(ref short_url) = link.short_url {
        println!("  Short:   {}", short_url.bright_yellow());
    }
    println!(
        "  Created: {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string().bright_black()
    );
    println!();
}
