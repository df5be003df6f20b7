//! Diagnostic checks
//!
//! Each check issues its own requests through the shared [`HttpClient`] and
//! folds every outcome, including transport errors, into a [`CheckResult`].
//! Checks never return errors and never depend on each other.

mod auth;
mod connectivity;
mod error_probe;
mod models;
mod performance;
mod rate_limit;

pub use auth::AuthCheck;
pub use connectivity::ConnectivityCheck;
pub use error_probe::ErrorProbeCheck;
pub use models::{parse_model_listing, ModelAvailabilityCheck, ModelListing};
pub use performance::{classify_latency, PerformanceCheck, PERF_PROMPTS};
pub use rate_limit::{
    classify_utilization, evaluate_rate_limit, RateLimitCheck, RATE_LIMIT_FAIL_PERCENT,
    RATE_LIMIT_WARN_PERCENT,
};

use crate::config::DiagnosticConfig;
use crate::result::CheckResult;
use async_trait::async_trait;
use inferdoc_http::HttpClient;
use std::sync::Arc;

/// Name of the connectivity check
pub const CONNECTIVITY: &str = "API Connectivity";
/// Name of the authentication check
pub const AUTHENTICATION: &str = "Authentication";
/// Name of the model availability check
pub const MODEL_AVAILABILITY: &str = "Model Availability";
/// Name of the performance check
pub const PERFORMANCE: &str = "Inference Performance";
/// Name of the rate-limit check
pub const RATE_LIMITS: &str = "Rate Limits";
/// Name of the error-pattern probe
pub const ERROR_HANDLING: &str = "Error Handling";

/// Everything a check may use
#[derive(Debug, Clone)]
pub struct CheckContext {
    /// Shared provider client
    pub client: Arc<HttpClient>,
    /// Run configuration
    pub config: Arc<DiagnosticConfig>,
}

impl CheckContext {
    /// Create a context
    #[must_use]
    pub fn new(client: Arc<HttpClient>, config: Arc<DiagnosticConfig>) -> Self {
        Self { client, config }
    }
}

/// One independent diagnostic probe
#[async_trait]
pub trait DiagnosticCheck: Send + Sync {
    /// Name shown in reports
    fn name(&self) -> &'static str;

    /// Run the probe. Failures are reported in the result, never raised.
    async fn run(&self, ctx: &CheckContext) -> CheckResult;
}

/// The standard checks in execution order, plus the error probe when enabled
#[must_use]
pub fn default_checks(config: &DiagnosticConfig) -> Vec<Box<dyn DiagnosticCheck>> {
    let mut checks: Vec<Box<dyn DiagnosticCheck>> = vec![
        Box::new(ConnectivityCheck),
        Box::new(AuthCheck),
        Box::new(ModelAvailabilityCheck),
        Box::new(PerformanceCheck),
        Box::new(RateLimitCheck),
    ];
    if config.probe_errors {
        checks.push(Box::new(ErrorProbeCheck));
    }
    checks
}

/// Inference payload used by the probes
pub(crate) fn inference_payload(
    model: &str,
    prompt: &str,
    max_tokens: u32,
    temperature: f64,
) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "prompt": prompt,
        "max_tokens": max_tokens,
        "temperature": temperature,
    })
}

#[cfg(test)]
mod tests;
