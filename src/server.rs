//! Server Module
//!
//! Process startup shared by both binaries: logging, configuration, the store
//! handle, the listener and graceful shutdown.

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::AppState;
use crate::config::{Config, StoreBackend};

/// Filter used when RUST_LOG is unset. All application logging happens in
/// this library, whichever binary runs it.
pub const DEFAULT_LOG_FILTER: &str = "redis_http=info,tower_http=info";

/// Initializes the tracing subscriber.
///
/// Defaults to "info" level, can be overridden with the RUST_LOG env var.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Runs one front-end until Ctrl+C or SIGTERM.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Create the store handle (Redis is dialed lazily, on the first request)
/// 3. Build the router with the state
/// 4. Bind the listener and serve
///
/// The store handle lives in the router state and is dropped, closing any
/// open connection, once the server has drained.
pub async fn run(name: &str, build_router: fn(AppState) -> Router) -> Result<()> {
    info!("Starting {}", name);

    let config = Config::from_env()?;
    log_config(&config);

    let state = AppState::from_config(&config)
        .with_context(|| format!("invalid store address {}", config.redis_url()))?;
    info!("Store client ready ({})", config.backend);

    let app = build_router(state);
    let listener = bind(&config).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete, store connection closed");
    Ok(())
}

fn log_config(config: &Config) {
    match config.backend {
        StoreBackend::Redis => info!(
            "Configuration loaded: redis={}, counter_key={}, port={}",
            config.redis_url(),
            config.counter_key,
            config.server_port
        ),
        StoreBackend::Memory => info!(
            "Configuration loaded: in-memory store, counter_key={}, port={}",
            config.counter_key, config.server_port
        ),
    }
}

/// Binds the HTTP listener to the configured host and port.
pub async fn bind(config: &Config) -> Result<TcpListener> {
    let addr = format!("{}:{}", config.server_host, config.server_port);
    TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
