//! matchkeeper server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use matchkeeper::app_state::AppState;
use matchkeeper::config::{KeeperConfig, LogFormat};
use matchkeeper::seed::seed_demo_data;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = KeeperConfig::from_env().context("invalid configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting matchkeeper");

    let app_state = AppState::new(&config);
    if config.seed_demo_data {
        seed_demo_data(&app_state)
            .await
            .context("failed to seed demo data")?;
    }

    let app = matchkeeper::build_app(app_state, &config);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
