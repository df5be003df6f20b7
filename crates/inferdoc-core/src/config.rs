//! Diagnostic configuration
//!
//! Built once at startup (see the binary's loader for the layering) and
//! read-only afterwards. [`DiagnosticConfig::validate`] runs before any
//! network call so a bad setup never reaches the provider.

use crate::error::{Error, Result};
use inferdoc_http::util::mask_api_key;
use inferdoc_http::{CircuitBreakerConfig, ClientConfig, RetryConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Models probed when none are configured
pub const DEFAULT_MODELS: &[&str] = &[
    "mistralai/Mistral-7B-Instruct-v0.1",
    "meta-llama/Llama-2-7b-chat-hf",
    "NousResearch/Nous-Hermes-2-Mixtral-8x7B-DPO",
];

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Debug and above
    Debug,
    /// Info and above
    #[default]
    Info,
    /// Warnings and errors
    Warning,
    /// Errors only
    Error,
}

impl LogLevel {
    /// Directive usable in a tracing `EnvFilter`
    #[must_use]
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warning),
            "error" | "critical" => Ok(Self::Error),
            other => Err(Error::config(
                "log_level",
                format!("unknown level '{other}' (expected TRACE, DEBUG, INFO, WARNING or ERROR)"),
            )),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_string()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Latency expectations for a kind of workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceProfile {
    /// Interactive chat
    RealTimeChat,
    /// API backend services
    #[default]
    ApiBackend,
    /// Non-interactive batch jobs
    BatchProcessing,
}

impl PerformanceProfile {
    /// Average-latency threshold in milliseconds
    #[must_use]
    pub fn threshold_ms(&self) -> u64 {
        match self {
            Self::RealTimeChat => 2_000,
            Self::ApiBackend => 5_000,
            Self::BatchProcessing => 30_000,
        }
    }

    /// Stable identifier
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RealTimeChat => "real_time_chat",
            Self::ApiBackend => "api_backend",
            Self::BatchProcessing => "batch_processing",
        }
    }
}

impl FromStr for PerformanceProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "real_time_chat" => Ok(Self::RealTimeChat),
            "api_backend" => Ok(Self::ApiBackend),
            "batch_processing" => Ok(Self::BatchProcessing),
            other => Err(Error::config(
                "performance_profile",
                format!("unknown profile '{other}'"),
            )),
        }
    }
}

/// Settings for one diagnostic run
///
/// Field names follow the `TOGETHER_AI_*` environment variables, so
/// `TOGETHER_AI_PERF_TESTS` lands in `perf_test_count`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticConfig {
    /// Provider API key (required)
    pub api_key: String,
    /// Provider base URL
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(rename = "timeout")]
    pub timeout_seconds: u64,
    /// Retries for transient failures
    pub max_retries: u32,
    /// Log verbosity
    pub log_level: LogLevel,
    /// Models whose availability is checked
    pub models_to_test: Vec<String>,
    /// Number of timed inference calls
    #[serde(rename = "perf_tests")]
    pub perf_test_count: u32,
    /// Maximum in-flight inference calls during the performance check
    #[serde(rename = "concurrent")]
    pub concurrent_requests: usize,
    /// Latency profile
    pub performance_profile: PerformanceProfile,
    /// Explicit latency threshold; overrides the profile when set
    pub latency_threshold_ms: Option<u64>,
    /// Upper bound for a single check; raised to the request budget when lower
    pub check_timeout_seconds: u64,
    /// Consecutive failures before the circuit opens
    pub circuit_breaker_threshold: u32,
    /// Seconds before an open circuit allows a trial request
    pub circuit_breaker_timeout_seconds: u64,
    /// Model listing endpoint
    pub models_path: String,
    /// Endpoint used by the authentication check
    pub auth_probe_path: String,
    /// Inference endpoint
    pub inference_path: String,
    /// Model for the performance and rate-limit probes (first tested model if unset)
    pub perf_model: Option<String>,
    /// Run the malformed-request probe as a sixth check
    pub probe_errors: bool,
    /// Log file path
    pub log_file: String,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            log_level: LogLevel::Info,
            models_to_test: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            perf_test_count: 3,
            concurrent_requests: 5,
            performance_profile: PerformanceProfile::ApiBackend,
            latency_threshold_ms: None,
            check_timeout_seconds: 120,
            circuit_breaker_threshold: 5,
            circuit_breaker_timeout_seconds: 60,
            models_path: "/v1/models".to_string(),
            auth_probe_path: "/v1/models".to_string(),
            inference_path: "/inference".to_string(),
            perf_model: None,
            probe_errors: false,
            log_file: "inferdoc.log".to_string(),
        }
    }
}

// SECURITY: Custom Debug implementation to mask API key
impl fmt::Debug for DiagnosticConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_retries", &self.max_retries)
            .field("log_level", &self.log_level)
            .field("models_to_test", &self.models_to_test)
            .field("perf_test_count", &self.perf_test_count)
            .field("concurrent_requests", &self.concurrent_requests)
            .field("performance_profile", &self.performance_profile)
            .field("latency_threshold_ms", &self.latency_threshold_ms)
            .field("check_timeout_seconds", &self.check_timeout_seconds)
            .field("perf_model", &self.perf_model)
            .field("probe_errors", &self.probe_errors)
            .finish_non_exhaustive()
    }
}

impl DiagnosticConfig {
    /// Defaults plus the given key
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Reject settings no diagnostic run can work with.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::config("api_key", "API key is required"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::config(
                "base_url",
                format!("'{}' is not an http(s) URL", self.base_url),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::config(
                "timeout_seconds",
                "must be a positive number of seconds",
            ));
        }
        if self.perf_test_count == 0 {
            return Err(Error::config("perf_test_count", "must be at least 1"));
        }
        if self.concurrent_requests == 0 {
            return Err(Error::config("concurrent_requests", "must be at least 1"));
        }
        if self.models_to_test.iter().all(|m| m.trim().is_empty()) {
            return Err(Error::config(
                "models_to_test",
                "at least one model is required",
            ));
        }
        if self.check_timeout_seconds == 0 {
            return Err(Error::config("check_timeout_seconds", "must be positive"));
        }
        if self.latency_threshold_ms == Some(0) {
            return Err(Error::config("latency_threshold_ms", "must be positive"));
        }
        Ok(())
    }

    /// Average-latency threshold for the performance check
    #[must_use]
    pub fn latency_threshold_ms(&self) -> u64 {
        self.latency_threshold_ms
            .unwrap_or_else(|| self.performance_profile.threshold_ms())
    }

    /// Model used by the performance and rate-limit probes
    #[must_use]
    pub fn probe_model(&self) -> &str {
        self.perf_model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.models_to_test.iter().map(String::as_str).find(|m| !m.trim().is_empty()))
            .unwrap_or(DEFAULT_MODELS[0])
    }

    /// Per-request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Worst case for one request: every attempt times out and every
    /// backoff sleep carries maximum jitter
    #[must_use]
    pub fn request_budget(&self) -> Duration {
        let retry = self.retry_config();
        self.timeout() * retry.max_attempts() + retry.max_total_delay()
    }

    /// Per-check bound, never shorter than [`request_budget`](Self::request_budget)
    /// rounded up to whole seconds
    #[must_use]
    pub fn check_timeout(&self) -> Duration {
        let budget = self.request_budget();
        let budget_secs = budget.as_secs() + u64::from(budget.subsec_nanos() > 0);
        Duration::from_secs(self.check_timeout_seconds.max(budget_secs))
    }

    fn retry_config(&self) -> RetryConfig {
        RetryConfig::new().with_max_retries(self.max_retries)
    }

    /// HTTP wrapper settings derived from this configuration
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_key.trim())
            .with_base_url(self.base_url.as_str())
            .with_timeout(self.timeout())
            .with_retry(self.retry_config())
            .with_circuit_breaker(
                CircuitBreakerConfig::new()
                    .with_failure_threshold(self.circuit_breaker_threshold)
                    .with_reset_timeout(Duration::from_secs(self.circuit_breaker_timeout_seconds)),
            )
    }
}
