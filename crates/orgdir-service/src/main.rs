//! Organization directory service - HTTP API over the directory database.
//!
//! This is the main entry point for the orgdir service.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orgdir_service::{create_router, AppState, LogFormat, ServiceConfig};
use orgdir_store::PgStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    // Held for the life of the process so buffered file logs are flushed.
    let _log_guard = init_tracing(&config);

    tracing::info!("Starting organization directory service");
    tracing::info!(
        listen_addr = %config.listen_addr,
        database_url = %config.masked_database_url(),
        max_connections = config.database_max_connections,
        api_key_header = %config.api_key_header,
        api_key_configured = config.api_key.is_some(),
        log_path = ?config.log_path,
        run_migrations = config.run_migrations,
        "Service configuration loaded"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to database");
            e
        })?;
    tracing::info!("Database connection pool created");

    let store = PgStore::new(pool);
    if config.run_migrations {
        store.migrate().await?;
    }
    store.check_schema().await?;

    let state = AppState::with_store(store, config.clone());
    let app = create_router(state);

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins over `LOG_LEVEL`; `LOG_FORMAT=json` selects JSON output.
///
/// With `LOG_PATH` set, events are appended to that file (no rotation, no
/// ANSI colours) through a non-blocking writer whose guard is returned.
fn init_tracing(config: &ServiceConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_level.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    if let Some((dir, file_name)) = config.log_file() {
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        match config.log_format {
            LogFormat::Json => registry.with(layer.json()).init(),
            LogFormat::Text => registry.with(layer).init(),
        }
        return Some(guard);
    }

    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
    None
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
