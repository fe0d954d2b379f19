//! catalog-server: HTTP API server for catalog items.
//!
//! This crate ties the other catalog-* crates together into a running
//! server application. It provides:
//!
//! - Axum-based JSON API for item create, read, update, delete, and search
//! - Request id propagation and uniform error bodies
//! - An OpenAPI document generated with utoipa
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use catalog_core::config::Config;
use catalog_db::SqliteItemStore;

use crate::context::AppContext;

/// Start the catalog server.
///
/// This is the main entry point. It opens the database, constructs the
/// [`AppContext`], and serves HTTP until a shutdown signal is received.
pub async fn start(config: Config) -> catalog_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let db_str = config.server.db_path.to_string_lossy().into_owned();
    let existed = config.server.db_path.exists();
    let db = catalog_db::pool::init_pool(&db_str)?;
    if existed {
        tracing::info!("Database opened (existing) at {db_str}");
    } else {
        tracing::info!("Database created (new) at {db_str}");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| catalog_core::Error::Internal(format!("Invalid server address: {e}")))?;

    if config.api.legacy_status_codes {
        tracing::info!("Legacy status codes enabled");
    }

    let ctx = AppContext::new(Arc::new(SqliteItemStore::new(db)), config);
    let app = router::build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| catalog_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
