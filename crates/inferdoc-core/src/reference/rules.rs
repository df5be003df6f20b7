//! Diagnostic rules
//!
//! Each rule pairs a condition over a check result with a prioritized
//! message and follow-up actions. Rules are evaluated in declaration order
//! and every matching rule is reported.

use crate::result::CheckResult;
use serde::Serialize;

/// How urgent a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Blocks usage
    High,
    /// Degrades usage
    Medium,
}

/// When a rule applies
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleCondition {
    /// The result carries this status code
    Status {
        /// HTTP status code
        code: u16,
    },
    /// The result carries this status code and its message contains `text`
    StatusWithText {
        /// HTTP status code
        code: u16,
        /// Lowercase fragment searched in the message
        text: &'static str,
    },
    /// Latency metric above the limit
    LatencyAbove {
        /// Limit in milliseconds
        ms: f64,
    },
    /// The underlying request timed out
    ConnectionTimeout,
}

impl RuleCondition {
    /// Whether the condition holds for `result`
    #[must_use]
    pub fn matches(&self, result: &CheckResult) -> bool {
        match *self {
            Self::Status { code } => result.raw_status_code == Some(code),
            Self::StatusWithText { code, text } => {
                result.raw_status_code == Some(code)
                    && result.message.to_lowercase().contains(text)
            }
            Self::LatencyAbove { ms } => result
                .metric
                .as_ref()
                .is_some_and(|m| m.is_latency_ms() && m.value > ms),
            Self::ConnectionTimeout => result.timed_out,
        }
    }
}

/// A finding with prioritized follow-up actions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiagnosticRule {
    /// Trigger
    pub condition: RuleCondition,
    /// Urgency
    pub priority: Priority,
    /// Area of the problem
    pub category: &'static str,
    /// Finding
    pub message: &'static str,
    /// Follow-up actions
    pub actions: &'static [&'static str],
}

static DIAGNOSTIC_RULES: &[DiagnosticRule] = &[
    DiagnosticRule {
        condition: RuleCondition::Status { code: 503 },
        priority: Priority::High,
        category: "availability",
        message: "Service unavailable - likely capacity or maintenance issue",
        actions: &[
            "Check status.together.ai for incidents",
            "Implement retry with exponential backoff",
            "Consider dedicated instances for guaranteed capacity",
        ],
    },
    DiagnosticRule {
        condition: RuleCondition::StatusWithText {
            code: 429,
            text: "rate limit",
        },
        priority: Priority::High,
        category: "rate_limiting",
        message: "Rate limit exceeded - need to reduce request frequency",
        actions: &[
            "Check current rate limit in Settings > Billing",
            "Implement request queuing",
            "Request rate limit increase if justified",
            "Add exponential backoff",
        ],
    },
    DiagnosticRule {
        condition: RuleCondition::Status { code: 401 },
        priority: Priority::High,
        category: "authentication",
        message: "Authentication failure - API key issue",
        actions: &[
            "Verify API key format and validity",
            "Check Authorization header format",
            "Regenerate API key if compromised",
            "Ensure API key has required permissions",
        ],
    },
    DiagnosticRule {
        condition: RuleCondition::LatencyAbove { ms: 10_000.0 },
        priority: Priority::Medium,
        category: "performance",
        message: "High latency detected - performance issue",
        actions: &[
            "Try smaller/faster model",
            "Check system load and capacity",
            "Optimize prompt length and complexity",
            "Consider dedicated instances",
        ],
    },
    DiagnosticRule {
        condition: RuleCondition::StatusWithText {
            code: 400,
            text: "model",
        },
        priority: Priority::Medium,
        category: "configuration",
        message: "Invalid model specification",
        actions: &[
            "Check model name against /models endpoint",
            "Verify model is available in your tier",
            "Check spelling and case sensitivity",
            "Try alternative similar model",
        ],
    },
    DiagnosticRule {
        condition: RuleCondition::StatusWithText {
            code: 400,
            text: "max_tokens",
        },
        priority: Priority::Medium,
        category: "configuration",
        message: "Token limit exceeded for model",
        actions: &[
            "Reduce max_tokens parameter",
            "Check model's context length limit",
            "Split request into smaller chunks",
            "Use model with higher token limit",
        ],
    },
    DiagnosticRule {
        condition: RuleCondition::ConnectionTimeout,
        priority: Priority::Medium,
        category: "connectivity",
        message: "Network connectivity issue",
        actions: &[
            "Check internet connection",
            "Verify firewall settings",
            "Test with different network",
            "Increase client timeout values",
        ],
    },
];

/// All rules in evaluation order
#[must_use]
pub fn diagnostic_rules() -> &'static [DiagnosticRule] {
    DIAGNOSTIC_RULES
}

/// Rules that apply to `result`, in declaration order
#[must_use]
pub fn evaluate_rules(result: &CheckResult) -> Vec<&'static DiagnosticRule> {
    DIAGNOSTIC_RULES
        .iter()
        .filter(|rule| rule.condition.matches(result))
        .collect()
}
