use super::DiagnosticReport;
use crate::result::CheckResult;
use std::fmt::Write;

const RULE: &str = "==================================================";

fn push_result(out: &mut String, result: &CheckResult) {
    let _ = writeln!(out, "[{}] {}: {}", result.status.label(), result.name, result.message);
    if let Some(metric) = &result.metric {
        let _ = writeln!(out, "  Metric: {:.1} {} ({})", metric.value, metric.unit, metric.name);
    }
    if let Some(code) = result.raw_status_code {
        let _ = writeln!(out, "  HTTP status: {}", code);
    }
    if let Some(recommendation) = &result.recommendation {
        let _ = writeln!(out, "  → Recommendation: {}", recommendation);
    }
}

/// Render the report for the terminal
#[must_use]
pub fn render_text(report: &DiagnosticReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Inference API Diagnostic ===");
    let _ = writeln!(out, "Endpoint: {}", report.base_url);
    let _ = writeln!(
        out,
        "Run: {} at {}",
        report.run_id,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out.push('\n');

    for result in &report.results {
        push_result(&mut out, result);
    }

    let summary = report.summary();
    let _ = writeln!(out, "\n{RULE}\nDIAGNOSTIC SUMMARY\n{RULE}");
    let _ = writeln!(
        out,
        "Test Results: {} PASSED, {} FAILED, {} WARNINGS out of {} total tests",
        summary.passed, summary.failed, summary.warned, summary.total
    );

    out.push_str("\nCritical Issues:\n");
    if summary.critical_issues.is_empty() {
        out.push_str("• None detected\n");
    }
    for issue in &summary.critical_issues {
        let _ = writeln!(out, "• {}: {}", issue.check, issue.message);
        if let Some(action) = &issue.action {
            let _ = writeln!(out, "  Action: {}", action);
        }
    }

    if !summary.recommended_actions.is_empty() {
        out.push_str("\nRecommended Actions:\n");
        for action in &summary.recommended_actions {
            let _ = writeln!(out, "• {}", action);
        }
    }

    let findings = report.findings();
    if !findings.is_empty() {
        out.push_str("\nFindings:\n");
        for finding in &findings {
            let _ = writeln!(
                out,
                "• [{:?}] {} ({}): {}",
                finding.rule.priority, finding.check, finding.rule.category, finding.rule.message
            );
            for action in finding.rule.actions {
                let _ = writeln!(out, "    - {}", action);
            }
        }
    }

    for entry in report.error_codes() {
        let _ = writeln!(out, "\nHTTP {} {}", entry.code, entry.name);
        out.push_str("  Common causes:\n");
        for cause in entry.causes {
            let _ = writeln!(out, "    - {}", cause);
        }
        out.push_str("  Solutions:\n");
        for solution in entry.solutions {
            let _ = writeln!(out, "    - {}", solution);
        }
    }

    out
}
