//! Diagnostic report and renderers
//!
//! Rendering is pure: every function here takes the finished report and
//! returns text, with no I/O.

mod html;
mod summary;
mod text;

pub use html::render_html;
pub use summary::{CriticalIssue, Summary};
pub use text::render_text;

use crate::error::Result;
use crate::reference::{evaluate_rules, lookup_error_code, DiagnosticRule, ErrorCodeEntry};
use crate::result::CheckResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Results of one diagnostic run
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    /// Unique run id
    pub run_id: Uuid,
    /// When the run finished
    pub generated_at: DateTime<Utc>,
    /// Provider that was diagnosed
    pub base_url: String,
    /// Results in execution order
    pub results: Vec<CheckResult>,
}

/// A diagnostic rule that fired for a check
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// Check that triggered the rule
    pub check: String,
    /// The rule
    #[serde(flatten)]
    pub rule: &'static DiagnosticRule,
}

/// Everything a renderer shows, in serializable form
#[derive(Debug, Clone, Serialize)]
pub struct ReportView<'a> {
    /// Report metadata and results
    #[serde(flatten)]
    pub report: &'a DiagnosticReport,
    /// Counts and recommended actions
    pub summary: Summary,
    /// Reference entries for every HTTP error code seen
    pub error_codes: Vec<&'static ErrorCodeEntry>,
    /// Diagnostic rules that fired
    pub findings: Vec<Finding>,
}

impl DiagnosticReport {
    /// Create a report stamped with a fresh id and the current time
    #[must_use]
    pub fn new(base_url: impl Into<String>, results: Vec<CheckResult>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            base_url: base_url.into(),
            results,
        }
    }

    /// Counts, critical issues and recommended actions
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::from_results(&self.results)
    }

    /// Error table entries for the HTTP error codes in the results, first
    /// occurrence order, no duplicates
    #[must_use]
    pub fn error_codes(&self) -> Vec<&'static ErrorCodeEntry> {
        let mut entries: Vec<&'static ErrorCodeEntry> = Vec::new();
        for code in self.results.iter().filter_map(CheckResult::error_code) {
            if let Some(entry) = lookup_error_code(code) {
                if !entries.iter().any(|e| e.code == entry.code) {
                    entries.push(entry);
                }
            }
        }
        entries
    }

    /// Diagnostic rules that fired for non-passing results
    #[must_use]
    pub fn findings(&self) -> Vec<Finding> {
        self.results
            .iter()
            .filter(|r| !r.is_pass())
            .flat_map(|r| {
                evaluate_rules(r).into_iter().map(move |rule| Finding {
                    check: r.name.clone(),
                    rule,
                })
            })
            .collect()
    }

    /// Full view for serialization
    #[must_use]
    pub fn view(&self) -> ReportView<'_> {
        ReportView {
            report: self,
            summary: self.summary(),
            error_codes: self.error_codes(),
            findings: self.findings(),
        }
    }

    /// Pretty-printed JSON of [`Self::view`]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.view())?)
    }

    /// Default file name for the saved JSON report
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "inferdoc_diagnostic_{}.json",
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }
}

#[cfg(test)]
mod tests;
