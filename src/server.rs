//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, service wiring, and the Axum server lifecycle.

use crate::application::services::RedirectService;
use crate::config::{Config, StoreBackend};
use crate::domain::repositories::LinkStore;
use crate::infrastructure::persistence::{MemoryLinkStore, PgLinkStore, RedisLinkStore};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Connection attempts made at startup before giving up.
const CONNECT_ATTEMPTS: usize = 5;

/// Connects the configured link store.
///
/// PostgreSQL migrations are applied on connect, and every pooled session
/// gets a `statement_timeout` shorter than the store timeout. Connection
/// attempts are retried with jittered exponential backoff so the service can
/// start alongside its database.
///
/// # Errors
///
/// Returns an error if the store is still unreachable after all retries or
/// migrations fail.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn LinkStore>> {
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(CONNECT_ATTEMPTS - 1);

    match config.store_backend {
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is not configured")?;
            let connect_options = url
                .parse::<PgConnectOptions>()
                .context("Invalid DATABASE_URL")?
                .options([(
                    "statement_timeout",
                    format!("{}ms", config.statement_timeout_ms()),
                )]);

            let pool = Retry::spawn(strategy, || {
                PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                    .connect_with(connect_options.clone())
            })
            .await
            .context("Failed to connect to PostgreSQL")?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            Ok(Arc::new(PgLinkStore::new(Arc::new(pool))))
        }
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .clone()
                .context("REDIS_URL is not configured")?;

            let store = Retry::spawn(strategy, || RedisLinkStore::connect(&url))
                .await
                .context("Failed to connect to Redis")?;

            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory link store; links are lost on restart");
            Ok(Arc::new(MemoryLinkStore::new()))
        }
    }
}

/// Wires a [`RedirectService`] on top of `store` using the configured
/// code length, retry budget and store timeout.
pub fn build_service(config: &Config, store: Arc<dyn LinkStore>) -> RedirectService {
    RedirectService::new(store, Arc::new(RandomCodeGenerator::new(config.code_length)))
        .with_max_attempts(config.max_code_attempts)
        .with_store_timeout(config.store_timeout())
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The link store cannot be reached
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;
    let service = build_service(&config, store);

    let state = AppState::new(Arc::new(service));
    let app = app_router(state, &config.cors_allow_origin);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
