//! `inferdoc diagnose`

use super::OutputFormat;
use anyhow::{anyhow, Context, Result};
use inferdoc_core::{
    format_error_for_cli, render_html, render_text, DiagnosticConfig, DiagnosticReport,
    Diagnostician,
};
use inferdoc_http::{ReqwestTransport, Transport};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Render `report` in the requested format
pub fn render(report: &DiagnosticReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Html => render_html(report),
        OutputFormat::Json => report.to_json()?,
    })
}

/// Write the JSON report next to the working directory, returning its name
pub fn save_json(report: &DiagnosticReport) -> Result<String> {
    let name = report.file_name();
    std::fs::write(&name, report.to_json()?)
        .with_context(|| format!("Failed to write {}", name))?;
    Ok(name)
}

/// Validate `config` and build the runner. The error carries the CLI-formatted
/// message and is printed once, by the caller.
fn prepare(config: DiagnosticConfig, transport: Arc<dyn Transport>) -> Result<Diagnostician> {
    Diagnostician::new(config, transport)
        .map_err(|e| anyhow!("{}", format_error_for_cli(&e).trim_end()))
}

/// Run every check against the configured provider.
///
/// Check failures are part of the report, not errors; only setup problems
/// (bad config, unwritable output) return `Err`.
pub async fn execute(config: DiagnosticConfig) -> Result<DiagnosticReport> {
    let transport = ReqwestTransport::new().context("Failed to build HTTP client")?;
    let diagnostician = prepare(config, Arc::new(transport))?;

    println!(
        "🔍 Running diagnostics against {}...\n",
        diagnostician.config().base_url
    );
    Ok(diagnostician.run().await)
}

pub async fn run(
    config: DiagnosticConfig,
    format: OutputFormat,
    output: Option<&Path>,
    save: bool,
) -> Result<()> {
    let report = execute(config).await?;
    let rendered = render(&report, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "report written");
            println!("📄 Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    if save {
        let name = save_json(&report)?;
        println!("💾 Detailed results saved to: {}", name);
    }
    Ok(())
}
