//! Diagnostic runner
//!
//! Validates the configuration, builds the shared client once, then runs
//! every check in order. Each check is bounded by the configured check
//! timeout; a check that overruns becomes a `fail` result and the next one
//! still runs. The circuit breaker is reset before each check so an outage
//! seen by one check never short-circuits the next.

use crate::checks::{default_checks, CheckContext, DiagnosticCheck};
use crate::config::DiagnosticConfig;
use crate::error::Result;
use crate::report::DiagnosticReport;
use crate::result::CheckResult;
use inferdoc_http::{HttpClient, Transport};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Runs a diagnostic suite against one provider
pub struct Diagnostician {
    ctx: CheckContext,
    checks: Vec<Box<dyn DiagnosticCheck>>,
}

impl std::fmt::Debug for Diagnostician {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.checks.iter().map(|c| c.name()).collect();
        f.debug_struct("Diagnostician")
            .field("config", &self.ctx.config)
            .field("checks", &names)
            .finish()
    }
}

impl Diagnostician {
    /// Validate `config` and prepare the standard checks.
    ///
    /// Returns [`Error::Config`](crate::Error::Config) before any request is
    /// made if the configuration is unusable.
    pub fn new(config: DiagnosticConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::new(config.client_config(), transport)?;
        let checks = default_checks(&config);
        Ok(Self {
            ctx: CheckContext::new(Arc::new(client), Arc::new(config)),
            checks,
        })
    }

    /// Replace the check list
    #[must_use]
    pub fn with_checks(mut self, checks: Vec<Box<dyn DiagnosticCheck>>) -> Self {
        self.checks = checks;
        self
    }

    /// Run configuration
    #[must_use]
    pub fn config(&self) -> &DiagnosticConfig {
        &self.ctx.config
    }

    /// Shared provider client
    #[must_use]
    pub fn client(&self) -> &Arc<HttpClient> {
        &self.ctx.client
    }

    /// Run one check under the per-check timeout
    pub async fn run_check(&self, check: &dyn DiagnosticCheck) -> CheckResult {
        let name = check.name();
        let limit = self.ctx.config.check_timeout();
        let start = Instant::now();
        self.ctx.client.circuit_breaker().reset();
        info!(check = name, "check started");

        let result = match tokio::time::timeout(limit, check.run(&self.ctx)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(check = name, timeout_secs = limit.as_secs(), "check timed out");
                CheckResult::fail(
                    name,
                    format!("check did not complete within {}s", limit.as_secs()),
                )
                .with_timed_out(true)
                .with_recommendation("Increase check_timeout_seconds or investigate provider latency")
            }
        };

        let metric = result
            .metric
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        info!(
            check = name,
            status = %result.status,
            metric = %metric,
            status_code = ?result.raw_status_code,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "check completed"
        );
        result
    }

    /// Run every check in order and collect the report
    #[instrument(skip(self), fields(base_url = %self.ctx.config.base_url))]
    pub async fn run(&self) -> DiagnosticReport {
        let mut results = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            results.push(self.run_check(check.as_ref()).await);
        }
        let report = DiagnosticReport::new(self.ctx.config.base_url.clone(), results);
        let summary = report.summary();
        info!(
            run_id = %report.run_id,
            passed = summary.passed,
            warned = summary.warned,
            failed = summary.failed,
            "diagnostic run finished"
        );
        report
    }
}

#[cfg(test)]
mod tests;
