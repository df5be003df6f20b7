//! Check outcome model

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Outcome of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Healthy
    Pass,
    /// Degraded or not verifiable
    Warn,
    /// Broken
    Fail,
}

impl CheckStatus {
    /// Uppercase label used in text output
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Warn => "WARN",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Warn => write!(f, "warn"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// A named numeric measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    /// Metric name (e.g. `avg_latency`)
    pub name: String,
    /// Value
    pub value: f64,
    /// Unit (e.g. `ms`, `%`)
    pub unit: String,
}

impl Metric {
    /// Create a metric
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
        }
    }

    /// Whether this metric is a latency in milliseconds
    #[must_use]
    pub fn is_latency_ms(&self) -> bool {
        self.unit == "ms" && self.name.contains("latency")
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:.1}{}", self.name, self.value, self.unit)
    }
}

/// Result of one check invocation
///
/// Built once through the constructors and `with_*` methods, then handed to
/// the report unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// Check name
    pub name: String,
    /// Outcome
    pub status: CheckStatus,
    /// One-line summary
    pub message: String,
    /// Primary measurement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<Metric>,
    /// HTTP status that caused a failure or warning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_status_code: Option<u16>,
    /// What the user should do about it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    /// Supporting data
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, serde_json::Value>,
    /// The failure was a timeout
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub timed_out: bool,
}

impl CheckResult {
    /// Create a result with the given status
    #[must_use]
    pub fn new(name: impl Into<String>, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
            metric: None,
            raw_status_code: None,
            recommendation: None,
            details: BTreeMap::new(),
            timed_out: false,
        }
    }

    /// Passing result
    #[must_use]
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Pass, message)
    }

    /// Warning result
    #[must_use]
    pub fn warn(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Warn, message)
    }

    /// Failing result
    #[must_use]
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Fail, message)
    }

    /// Failing result for an HTTP wrapper error
    #[must_use]
    pub fn from_http_error(name: impl Into<String>, error: &inferdoc_http::Error) -> Self {
        let mut result = Self::fail(name, error.to_string());
        result.raw_status_code = error.status_code();
        result.timed_out = error.is_timeout();
        result
    }

    /// Attach a metric
    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Attach the HTTP status code
    #[must_use]
    pub fn with_status_code(mut self, code: u16) -> Self {
        self.raw_status_code = Some(code);
        self
    }

    /// Attach a recommendation
    #[must_use]
    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    /// Attach a detail
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Mark as timed out
    #[must_use]
    pub fn with_timed_out(mut self, timed_out: bool) -> Self {
        self.timed_out = timed_out;
        self
    }

    /// Whether the check passed
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.status == CheckStatus::Pass
    }

    /// HTTP status code worth looking up in the error table
    #[must_use]
    pub fn error_code(&self) -> Option<u16> {
        self.raw_status_code.filter(|c| *c >= 400)
    }
}
