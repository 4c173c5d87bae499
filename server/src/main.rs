use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use todo_server::config::{describe, ServerConfig};
use todo_server::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(config.log_json);

    let store = config.open_store().await.context("failed to open todo store")?;
    let app = todo_server::app_with_assets(store, &config.static_dir);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(url = %describe(listener.local_addr()?), "listening");

    todo_server::run(listener, app, shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
        Err(err) => {
            tracing::error!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
