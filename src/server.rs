//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, adapter selection and the Axum server lifecycle.

use crate::application::services::{AuthService, LinkService};
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{LinkRepository, SequenceCounter};
use crate::infrastructure::memory::{MemoryLinkRepository, MemorySequenceCounter};
use crate::infrastructure::persistence::{PgLinkRepository, PgSequenceCounter};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_encoder::CodeEncoder;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Link store and counter adapters chosen by `STORAGE_BACKEND`.
pub struct Backends {
    pub links: Arc<dyn LinkRepository>,
    pub counter: Arc<dyn SequenceCounter>,
}

impl Backends {
    /// In-process adapters. Data lives as long as the process.
    pub fn memory(counter_start: u64) -> Self {
        Self {
            links: Arc::new(MemoryLinkRepository::new()),
            counter: Arc::new(MemorySequenceCounter::new(counter_start)),
        }
    }

    /// PostgreSQL adapters sharing one pool.
    pub fn postgres(pool: Arc<PgPool>, counter_name: &str, counter_start: u64) -> Self {
        Self {
            links: Arc::new(PgLinkRepository::new(pool.clone())),
            counter: Arc::new(PgSequenceCounter::new(pool, counter_name, counter_start)),
        }
    }
}

/// Connects to PostgreSQL with the configured pool limits and applies migrations.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is missing, the connection fails or a
/// migration cannot be applied.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres backend")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

/// Opens the backends selected by the configuration.
///
/// # Errors
///
/// Returns an error if the postgres backend is selected and the database is
/// unreachable.
pub async fn open_backends(config: &Config) -> Result<Backends> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_database(config).await?;
            Ok(Backends::postgres(
                Arc::new(pool),
                &config.counter_name,
                config.counter_start,
            ))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; links are lost on restart");
            Ok(Backends::memory(config.counter_start))
        }
    }
}

/// Wires services on top of `backends`.
///
/// # Errors
///
/// Returns an error if the encoder settings are invalid.
pub fn build_state(config: &Config, backends: Backends) -> Result<AppState> {
    let encoder = CodeEncoder::new(&config.hash_salt, config.hash_min_length)
        .context("Invalid code encoder settings")?;

    let link_service = LinkService::new(
        backends.links,
        backends.counter,
        encoder,
        config.base_url.clone(),
    );

    Ok(AppState::new(
        Arc::new(link_service),
        Arc::new(AuthService::new(&config.auth_key)),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool + migrations, or in-memory)
/// - Link and auth services
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let backends = open_backends(&config).await?;
    let state = build_state(&config, backends)?;

    let app = app_router(state, &config.public_dir);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
