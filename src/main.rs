//! Task-list service binary.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `9090`)
//! - `DEFAULT_PAGE_SIZE`: Page size when a request omits `size` (default: `10`)
//! - `WORKER_THREADS`: Number of tokio worker threads (default: logical CPU count)
//! - `RUST_LOG`: Logging level (e.g., `debug`, `info`, `todo_service=debug`)

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_service::api::{AppConfig, AppState, build_router};
use todo_service::infrastructure::{InMemoryTaskRepository, ServerConfig, SystemClock};
use todo_service::service::TaskService;

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = config.worker_threads {
        builder.worker_threads(threads.get());
        tracing::info!(threads = threads.get(), "Tokio worker threads configured");
    }

    let runtime = builder.build().expect("Failed to create tokio runtime");
    runtime.block_on(async_main(config));
}

async fn async_main(config: ServerConfig) {
    tracing::info!(
        address = %config.socket_address(),
        default_page_size = config.default_page_size.get(),
        "Starting task-list service"
    );

    let service = TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(SystemClock),
    );
    let application = build_router(AppState::with_config(service, AppConfig::from(&config)));

    let address = config.socket_address();
    let listener = match TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "Failed to bind to address {}", address);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

/// Completes when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
