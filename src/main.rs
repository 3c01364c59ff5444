//! GiveHub Server — donation platform core
//!
//! Main entry point that wires all crates together and starts the
//! background matching worker.

use std::sync::Arc;

use tokio::sync::watch;
use tracing;
use tracing_subscriber::{fmt, EnvFilter};

use givehub_core::config::AppConfig;
use givehub_core::error::AppError;
use givehub_database::repositories::{
    ListingRepository, NotificationRepository, SavedSearchRepository,
};
use givehub_service::{
    ListingStore, MatchEngine, NotificationDispatcher, NotificationStore, SavedSearchStore,
};
use givehub_worker::{MatchCycle, MatchScheduler};

#[tokio::main]
async fn main() {
    let env = std::env::var("GIVEHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting GiveHub v{}", env!("CARGO_PKG_VERSION"));

    // Database connection + migrations
    tracing::info!("Connecting to database...");
    let db = givehub_database::DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    givehub_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    // Repositories, exposed to the services as store trait objects
    let pool = db.pool().clone();
    let listings: Arc<dyn ListingStore> = Arc::new(ListingRepository::new(pool.clone()));
    let saved_searches: Arc<dyn SavedSearchStore> =
        Arc::new(SavedSearchRepository::new(pool.clone()));
    let notifications: Arc<dyn NotificationStore> =
        Arc::new(NotificationRepository::new(pool.clone()));

    let dispatcher = NotificationDispatcher::new(Arc::clone(&notifications));

    // Shutdown channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Background matching worker
    let worker_handle = if config.worker.enabled {
        tracing::info!("Starting matching worker...");

        let cycle = MatchCycle::new(
            Arc::clone(&saved_searches),
            MatchEngine::new(Arc::clone(&listings)),
            dispatcher,
        );
        let scheduler = MatchScheduler::new(cycle, config.worker.clone());

        let worker_cancel = shutdown_rx.clone();
        let handle = tokio::spawn(async move {
            scheduler.run(worker_cancel).await;
        });

        tracing::info!("Matching worker started");
        Some(handle)
    } else {
        tracing::info!("Matching worker disabled");
        None
    };

    tracing::info!("GiveHub server running, press Ctrl+C to stop");

    // Graceful shutdown
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
    let _ = shutdown_tx.send(true);

    if let Some(handle) = worker_handle {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(30), handle).await;
    }

    db.close().await;
    tracing::info!("GiveHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
