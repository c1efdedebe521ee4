use anyhow::Result;
use clap::Parser;
use sheet_relay::config::{CliArgs, ServerConfig};
use sheet_relay::server;
use sheet_relay::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();
    let config = Arc::new(ServerConfig::from_args(args)?);
    let state = Arc::new(AppState::new(config.clone()));

    let listener = TcpListener::bind(config.http_bind_address).await?;
    tracing::info!(address = %config.http_bind_address, "sheet-relay listening");

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown requested");
}
