//! Bizkit - business profile service
//!
//! Main entry point for the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use bizkit_api::utils::logging::init_tracing;
use bizkit_api::{build_router, AppContext};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading any configuration
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => warn!(error = %e, "Could not load .env file"),
    }

    let config = bizkit_infra::config::load_or_default();
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let ctx = Arc::new(AppContext::new(config).await.context("failed to initialise application")?);
    let app = build_router(ctx);

    let listener = TcpListener::bind(&addr).await.with_context(|| format!("failed to bind {addr}"))?;
    let local: SocketAddr = listener.local_addr().context("listener has no local address")?;
    info!(addr = %local, "Bizkit listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Bizkit stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
