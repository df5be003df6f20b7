use super::DiagnosticReport;
use crate::result::CheckStatus;
use std::fmt::Write;

/// Escape text for HTML element content and attribute values
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn status_class(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "pass",
        CheckStatus::Warn => "warn",
        CheckStatus::Fail => "fail",
    }
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:960px;margin:2rem auto;color:#222}\
table{border-collapse:collapse;width:100%}td,th{border:1px solid #ddd;padding:.4rem .6rem;text-align:left}\
.pass{color:#1a7f37}.warn{color:#9a6700}.fail{color:#cf222e}.muted{color:#666;font-size:.9em}";

/// Render the report as a standalone HTML page
#[must_use]
pub fn render_html(report: &DiagnosticReport) -> String {
    let summary = report.summary();
    let mut out = String::new();

    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Inference API Diagnostic</title>\n<style>{STYLE}</style>\n</head>\n<body>\n"
    );
    let _ = writeln!(out, "<h1>Inference API Diagnostic</h1>");
    let _ = writeln!(
        out,
        "<p class=\"muted\">{} &middot; run {} &middot; {}</p>",
        escape_html(&report.base_url),
        report.run_id,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(
        out,
        "<p><span class=\"pass\">{} passed</span>, <span class=\"warn\">{} warnings</span>, \
         <span class=\"fail\">{} failed</span> of {} checks</p>",
        summary.passed, summary.warned, summary.failed, summary.total
    );

    out.push_str("<table>\n<tr><th>Check</th><th>Status</th><th>Message</th><th>Metric</th><th>Recommendation</th></tr>\n");
    for result in &report.results {
        let metric = result
            .metric
            .as_ref()
            .map(|m| format!("{:.1} {}", m.value, m.unit))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td class=\"{}\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&result.name),
            status_class(result.status),
            result.status.label(),
            escape_html(&result.message),
            escape_html(&metric),
            escape_html(result.recommendation.as_deref().unwrap_or("")),
        );
    }
    out.push_str("</table>\n");

    if !summary.recommended_actions.is_empty() {
        out.push_str("<h2>Recommended Actions</h2>\n<ul>\n");
        for action in &summary.recommended_actions {
            let _ = writeln!(out, "<li>{}</li>", escape_html(action));
        }
        out.push_str("</ul>\n");
    }

    let findings = report.findings();
    if !findings.is_empty() {
        out.push_str("<h2>Findings</h2>\n");
        for finding in &findings {
            let _ = writeln!(
                out,
                "<h3>{}: {}</h3>\n<ul>",
                escape_html(&finding.check),
                escape_html(finding.rule.message)
            );
            for action in finding.rule.actions {
                let _ = writeln!(out, "<li>{}</li>", escape_html(action));
            }
            out.push_str("</ul>\n");
        }
    }

    for entry in report.error_codes() {
        let _ = writeln!(out, "<h2>HTTP {} {}</h2>", entry.code, escape_html(entry.name));
        out.push_str("<h3>Common causes</h3>\n<ul>\n");
        for cause in entry.causes {
            let _ = writeln!(out, "<li>{}</li>", escape_html(cause));
        }
        out.push_str("</ul>\n<h3>Solutions</h3>\n<ul>\n");
        for solution in entry.solutions {
            let _ = writeln!(out, "<li>{}</li>", escape_html(solution));
        }
        out.push_str("</ul>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}
