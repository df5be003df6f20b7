use crate::checks::{AUTHENTICATION, CONNECTIVITY, MODEL_AVAILABILITY, PERFORMANCE, RATE_LIMITS};
use crate::result::{CheckResult, CheckStatus};
use serde::Serialize;

/// A failing check worth calling out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticalIssue {
    /// Check name
    pub check: String,
    /// Failure message
    pub message: String,
    /// Suggested action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Aggregate view over all results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of checks run
    pub total: usize,
    /// Passing checks
    pub passed: usize,
    /// Warnings
    pub warned: usize,
    /// Failures
    pub failed: usize,
    /// Every failing check
    pub critical_issues: Vec<CriticalIssue>,
    /// Follow-up actions derived from the failure pattern
    pub recommended_actions: Vec<String>,
}

fn failed(results: &[CheckResult], name: &str) -> bool {
    results
        .iter()
        .any(|r| r.name == name && r.status == CheckStatus::Fail)
}

impl Summary {
    /// Summarize results
    #[must_use]
    pub fn from_results(results: &[CheckResult]) -> Self {
        let count = |status: CheckStatus| results.iter().filter(|r| r.status == status).count();

        let critical_issues = results
            .iter()
            .filter(|r| r.status == CheckStatus::Fail)
            .map(|r| CriticalIssue {
                check: r.name.clone(),
                message: r.message.clone(),
                action: r.recommendation.clone(),
            })
            .collect();

        let mut actions: Vec<&str> = Vec::new();
        if failed(results, CONNECTIVITY) {
            actions.push("Check your internet connection and API key");
            actions.push("Visit status.together.ai to check service status");
        }
        if failed(results, AUTHENTICATION) {
            actions.push("Verify your API key at api.together.ai Settings > API Keys");
        }
        let rate_limited = results.iter().any(|r| {
            r.raw_status_code == Some(429)
                || r.message.contains("429")
                || (r.name == RATE_LIMITS && r.status != CheckStatus::Pass && r.metric.is_some())
        });
        if rate_limited {
            actions.push("Implement rate limiting in your application");
            actions.push("Consider requesting higher rate limits");
            actions.push("Use exponential backoff for retries");
        }
        if failed(results, MODEL_AVAILABILITY) {
            actions.push("Verify model names using the /models endpoint");
            actions.push("Check if models require special access or billing tier");
        }
        if results
            .iter()
            .any(|r| r.name == PERFORMANCE && r.status != CheckStatus::Pass)
        {
            actions.push("Consider using smaller or faster models");
            actions.push("Check if you're on a busy tier - consider upgrading");
        }

        Self {
            total: results.len(),
            passed: count(CheckStatus::Pass),
            warned: count(CheckStatus::Warn),
            failed: count(CheckStatus::Fail),
            critical_issues,
            recommended_actions: actions.into_iter().map(String::from).collect(),
        }
    }

    /// Whether nothing failed or warned
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.failed == 0 && self.warned == 0
    }
}
