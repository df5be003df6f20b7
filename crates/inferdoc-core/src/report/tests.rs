use super::html::escape_html;
use super::*;
use crate::checks::{AUTHENTICATION, CONNECTIVITY, MODEL_AVAILABILITY, PERFORMANCE, RATE_LIMITS};
use crate::result::{CheckStatus, Metric};

fn mixed_results() -> Vec<CheckResult> {
    vec![
        CheckResult::pass(CONNECTIVITY, "connected (status 200)").with_status_code(200),
        CheckResult::fail(AUTHENTICATION, "invalid or missing API key")
            .with_status_code(401)
            .with_recommendation("Check your API key"),
        CheckResult::fail(MODEL_AVAILABILITY, "unavailable models: foo-7b"),
        CheckResult::warn(PERFORMANCE, "avg 6000ms")
            .with_metric(Metric::new("avg_latency", 6000.0, "ms")),
        CheckResult::fail(RATE_LIMITS, "Rate limit exceeded (429 error)").with_status_code(429),
    ]
}

#[test]
fn test_summary_counts_and_actions() {
    let summary = Summary::from_results(&mixed_results());
    assert_eq!(summary.total, 5);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.warned, 1);
    assert_eq!(summary.failed, 3);
    assert_eq!(summary.critical_issues.len(), 3);
    assert_eq!(summary.critical_issues[0].action.as_deref(), Some("Check your API key"));
    assert!(!summary.is_healthy());

    let actions = &summary.recommended_actions;
    assert!(actions.iter().any(|a| a.contains("rate limiting")));
    assert!(actions.iter().any(|a| a.contains("/models endpoint")));
    assert!(actions.iter().any(|a| a.contains("smaller or faster models")));
    assert!(!actions.iter().any(|a| a.contains("internet connection")));
}

#[test]
fn test_healthy_summary() {
    let summary = Summary::from_results(&[CheckResult::pass(CONNECTIVITY, "ok")]);
    assert!(summary.is_healthy());
    assert!(summary.recommended_actions.is_empty());
}

#[test]
fn test_error_codes_are_looked_up_once() {
    let mut results = mixed_results();
    results.push(CheckResult::fail("Again", "401 again").with_status_code(401));
    let report = DiagnosticReport::new("https://api.example.test", results);
    let codes: Vec<u16> = report.error_codes().iter().map(|e| e.code).collect();
    assert_eq!(codes, vec![401, 429]);
}

#[test]
fn test_findings_skip_passing_results() {
    let report = DiagnosticReport::new("https://api.example.test", mixed_results());
    let findings = report.findings();
    let categories: Vec<_> = findings.iter().map(|f| f.rule.category).collect();
    assert_eq!(categories, vec!["authentication", "rate_limiting"]);
    assert_eq!(findings[0].check, AUTHENTICATION);
}

#[test]
fn test_text_rendering_order_and_sections() {
    let report = DiagnosticReport::new("https://api.example.test", mixed_results());
    let text = render_text(&report);

    let conn = text.find("[PASS] API Connectivity").unwrap();
    let auth = text.find("[FAIL] Authentication").unwrap();
    let rate = text.find("[FAIL] Rate Limits").unwrap();
    assert!(conn < auth && auth < rate);

    assert!(text.contains("Test Results: 1 PASSED, 3 FAILED, 1 WARNINGS out of 5 total tests"));
    assert!(text.contains("HTTP 401 Unauthorized"));
    assert!(text.contains("HTTP 429 Rate Limit Exceeded"));
    assert!(text.contains("Implement exponential backoff"));
    assert!(text.contains("Metric: 6000.0 ms (avg_latency)"));
}

#[test]
fn test_text_rendering_without_failures() {
    let report = DiagnosticReport::new("u", vec![CheckResult::pass(CONNECTIVITY, "ok")]);
    let text = render_text(&report);
    assert!(text.contains("• None detected"));
    assert!(!text.contains("Recommended Actions"));
}

#[test]
fn test_html_escapes_text() {
    assert_eq!(escape_html("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");

    let report = DiagnosticReport::new(
        "https://api.example.test",
        vec![CheckResult::fail(CONNECTIVITY, "<script>alert(1)</script>").with_status_code(503)],
    );
    let html = render_html(&report);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("HTTP 503 Service Unavailable"));
    assert!(html.contains("class=\"fail\">FAIL"));
}

#[test]
fn test_json_view() {
    let report = DiagnosticReport::new("https://api.example.test", mixed_results());
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["base_url"], "https://api.example.test");
    assert_eq!(json["results"].as_array().unwrap().len(), 5);
    assert_eq!(json["results"][1]["status"], "fail");
    assert_eq!(json["summary"]["failed"], 3);
    assert_eq!(json["error_codes"][0]["code"], 401);
    assert_eq!(json["findings"][0]["category"], "authentication");
    assert_eq!(json["findings"][0]["condition"]["kind"], "status");
}

#[test]
fn test_file_name() {
    let report = DiagnosticReport::new("u", vec![]);
    let name = report.file_name();
    assert!(name.starts_with("inferdoc_diagnostic_"));
    assert!(name.ends_with(".json"));
    assert_eq!(name.len(), "inferdoc_diagnostic_20260101_120000.json".len());
    assert_eq!(CheckStatus::Pass.label(), "PASS");
}
