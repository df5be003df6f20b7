//! Proxy startup

use super::config::AppConfig;
use crate::api::{api_router, ApiState};
use anyhow::{Context, Result};
use inferdoc_http::ReqwestTransport;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received SIGTERM signal");
        }
    }
}

/// Run the proxy until Ctrl+C or SIGTERM
pub async fn run(config: AppConfig) -> Result<()> {
    let transport = ReqwestTransport::new().context("Failed to build HTTP client")?;
    let state = ApiState::new(config.diagnostic.clone(), Arc::new(transport));
    let app = api_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(upstream = %config.diagnostic.base_url, "Proxy listening on http://{}", addr);
    println!("🌐 Troubleshooting UI at http://localhost:{}", config.server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("inferdoc proxy stopped");
    Ok(())
}
