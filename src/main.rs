//! inferdoc - inference API troubleshooting
//!
//! CLI entry point: diagnostics, reference lookups and the browser proxy.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use inferdoc_core::DiagnosticConfig;
use std::path::Path;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod cli;
mod server;

/// Console and file logging. The returned guard flushes the file writer on drop.
fn init_tracing(config: &DiagnosticConfig) -> WorkerGuard {
    let level = config.log_level.as_filter();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("inferdoc={level},inferdoc_core={level},inferdoc_http={level},tower_http=info")
            .into()
    });

    let path = Path::new(&config.log_file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "inferdoc.log".into());
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();
    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();
    let config = server::load_config(&cli.overrides())?;
    let _log_guard = init_tracing(&config.diagnostic);

    info!("Starting inferdoc v{}", env!("CARGO_PKG_VERSION"));
    if config.diagnostic.api_key.trim().is_empty() && cli.command.is_some() {
        warn!(
            "No API key configured. Set {}_API_KEY or {}, or pass --api-key.",
            server::ENV_PREFIX,
            server::ALT_API_KEY_VAR
        );
    }

    cli::run(cli, config).await
}
