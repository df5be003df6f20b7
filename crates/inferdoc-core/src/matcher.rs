//! Free-text issue matcher
//!
//! Lowercases the complaint and returns the first pattern (in declaration
//! order) with any keyword contained in it. Matching is plain substring
//! containment, so "not 503-like" still matches the 503 pattern.

use crate::reference::{default_pattern, issue_patterns, IssuePattern};
use serde::Serialize;

/// Outcome of matching a complaint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssueMatch {
    /// Selected pattern (the default one when nothing matched)
    pub pattern: &'static IssuePattern,
    /// Keyword that selected it
    pub matched_keyword: Option<&'static str>,
}

impl IssueMatch {
    /// Whether no pattern matched and the general fallback was returned
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.matched_keyword.is_none()
    }

    /// Remedy text of the selected pattern
    #[must_use]
    pub fn remedy(&self) -> &'static str {
        self.pattern.remedy
    }

    /// Text block shown to the user
    #[must_use]
    pub fn render(&self) -> String {
        let pattern = self.pattern;
        let mut out = String::new();
        if pattern.causes.is_empty() {
            out.push_str(pattern.title);
            out.push_str(":\n");
        } else {
            out.push_str(&format!("{} - Possible Causes:\n", pattern.title));
            for cause in pattern.causes {
                out.push_str(&format!("• {}\n", cause));
            }
            out.push_str("\nRecommended Actions:\n");
        }
        out.push_str(pattern.remedy);
        out.push('\n');
        out
    }
}

/// Match a customer complaint against the issue playbook. Never fails.
#[must_use]
pub fn diagnose_issue(text: &str) -> IssueMatch {
    let lower = text.to_lowercase();
    for pattern in issue_patterns() {
        if let Some(keyword) = pattern.keywords.iter().find(|k| lower.contains(**k)) {
            return IssueMatch {
                pattern,
                matched_keyword: Some(*keyword),
            };
        }
    }
    IssueMatch {
        pattern: default_pattern(),
        matched_keyword: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_503_during_peak_hours() {
        let result = diagnose_issue("getting a lot of 503 during peak hours");
        assert_eq!(result.pattern.id, "service_unavailable");
        assert_eq!(result.matched_keyword, Some("503"));
        assert_eq!(result.remedy(), issue_patterns()[0].remedy);
        assert!(result
            .remedy()
            .starts_with("1. Check status.together.ai for known issues"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(diagnose_issue("Hitting the RATE LIMIT").pattern.id, "rate_limit_exceeded");
        assert_eq!(
            diagnose_issue("Authentication keeps failing").pattern.id,
            "authentication_failed"
        );
    }

    #[test]
    fn test_first_match_wins() {
        // mentions both 503 and 429; 503 is declared first
        let result = diagnose_issue("we see 429 and then 503");
        assert_eq!(result.pattern.id, "service_unavailable");
    }

    #[test]
    fn test_substring_semantics_are_literal() {
        assert_eq!(diagnose_issue("this is not 503-like").pattern.id, "service_unavailable");
        assert_eq!(diagnose_issue("responses are slowish").pattern.id, "slow_performance");
    }

    #[test]
    fn test_unmatched_returns_default() {
        let result = diagnose_issue("the output rhymes too much");
        assert!(result.is_default());
        assert_eq!(result.pattern.id, "general");
        assert!(diagnose_issue("").is_default());
    }

    #[test]
    fn test_deterministic() {
        let text = "requests time out with a timeout error";
        let first = diagnose_issue(text);
        for _ in 0..10 {
            assert_eq!(diagnose_issue(text), first);
        }
    }

    #[test]
    fn test_render_includes_causes_and_remedy() {
        let rendered = diagnose_issue("401 on every call").render();
        assert!(rendered.starts_with("401 Authentication Failed - Possible Causes:"));
        assert!(rendered.contains("• Incorrect header format"));
        assert!(rendered.contains("Recommended Actions:\n1. Verify API key"));

        let general = diagnose_issue("???").render();
        assert!(general.starts_with("General Troubleshooting Steps:\n1. Run full diagnostic"));
    }
}
