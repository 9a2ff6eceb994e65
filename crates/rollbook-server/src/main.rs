#![doc = include_str!("../README.md")]

mod server;

use clap::Parser;
use rollbook::CsvStore;
use server::config::{CliArgs, ServerConfig};
use server::routes;
use server::state::AppState;
use server::telemetry::init_telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    init_telemetry()?;

    let store = CsvStore::open(&config.data_file)?;

    // Queue sizing is a startup-time contract: a stored set that no longer
    // fits the queue is reported here, not midway through a request.
    let stored = store.list_all()?.len();
    if stored > config.pool.queue_capacity {
        anyhow::bail!(
            "queue capacity {} cannot hold the {stored} records already stored; raise --queue-capacity",
            config.pool.queue_capacity
        );
    }

    let state = AppState::new(Arc::new(store), config.pool);
    let app = routes::router(state);

    let listener = TcpListener::bind(&config.addr).await?;
    tracing::info!(
        addr = %config.addr,
        data_file = %config.data_file.display(),
        num_workers = config.pool.num_workers,
        queue_capacity = config.pool.queue_capacity,
        "starting record service"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("service shut down successfully");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Shutdown signal received, terminating gracefully...");
}
