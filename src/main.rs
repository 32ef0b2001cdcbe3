use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use todo_api_rust::auth::TokenManager;
use todo_api_rust::config::AppConfig;
use todo_api_rust::{app, with_global_layers, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // A missing secret is fatal here rather than a per-call error
    let config = AppConfig::from_env()?;
    tracing::info!("Starting Todo API in {:?} mode", config.environment);

    let tokens = TokenManager::new(&config.security.jwt_secret).context("failed to build token manager")?;
    let state = AppState::in_memory(Arc::new(tokens));
    let router = with_global_layers(app(state), &config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Todo API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
