use super::*;
use crate::checks::{CONNECTIVITY, RATE_LIMITS};
use crate::result::CheckStatus;
use crate::Error;
use async_trait::async_trait;
use inferdoc_http::mock::{MockReply, ScriptedTransport};
use inferdoc_http::HttpResponse;
use serde_json::json;
use std::time::Duration;

fn config() -> DiagnosticConfig {
    let mut config = DiagnosticConfig::with_api_key("tgp_test_key_1234567890");
    config.base_url = "https://api.example.test".to_string();
    config.models_to_test = vec!["a-7b".to_string()];
    config.max_retries = 0;
    config
}

fn healthy() -> Arc<ScriptedTransport> {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_get("/v1/models", HttpResponse::new(200).with_json(json!([{"id": "a-7b"}])));
    mock.on_post(
        "/inference",
        HttpResponse::new(200)
            .with_header("x-ratelimit-limit-requests", "60")
            .with_header("x-ratelimit-remaining-requests", "59")
            .with_json(json!({"output": {"choices": [{"text": "ok"}]}})),
    );
    mock
}

#[test]
fn test_empty_key_makes_no_requests() {
    let mock = healthy();
    let mut config = config();
    config.api_key = String::new();

    let err = Diagnostician::new(config, mock.clone()).unwrap_err();
    assert!(matches!(err, Error::Config { ref field, .. } if field == "api_key"));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_full_run_in_order() {
    let mock = healthy();
    let doctor = Diagnostician::new(config(), mock.clone()).unwrap();
    let report = doctor.run().await;

    let names: Vec<_> = report.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "API Connectivity",
            "Authentication",
            "Model Availability",
            "Inference Performance",
            "Rate Limits"
        ]
    );
    assert!(report.results.iter().all(|r| r.status == CheckStatus::Pass));
    assert_eq!(report.base_url, "https://api.example.test");
}

#[tokio::test]
async fn test_failed_check_does_not_stop_the_rest() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_get("/v1/models", MockReply::Network("connection refused".to_string()));
    mock.on_post(
        "/inference",
        HttpResponse::new(200).with_header("x-ratelimit-limit-requests", "10"),
    );
    let doctor = Diagnostician::new(config(), mock.clone()).unwrap();
    let report = doctor.run().await;

    assert_eq!(report.results.len(), 5);
    assert_eq!(report.results[0].name, CONNECTIVITY);
    assert_eq!(report.results[0].status, CheckStatus::Fail);
    assert_eq!(report.results[4].name, RATE_LIMITS);
    assert_eq!(report.results[4].status, CheckStatus::Pass);
}

struct StuckCheck;

#[async_trait]
impl DiagnosticCheck for StuckCheck {
    fn name(&self) -> &'static str {
        "Stuck"
    }

    async fn run(&self, _ctx: &CheckContext) -> CheckResult {
        tokio::time::sleep(Duration::from_secs(30)).await;
        CheckResult::pass("Stuck", "finished")
    }
}

#[tokio::test]
async fn test_check_timeout_becomes_fail() {
    let mut config = config();
    config.check_timeout_seconds = 1;
    config.timeout_seconds = 1;
    let doctor = Diagnostician::new(config, healthy())
        .unwrap()
        .with_checks(vec![
            Box::new(StuckCheck),
            Box::new(crate::checks::ConnectivityCheck),
        ]);

    let report = doctor.run().await;
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].status, CheckStatus::Fail);
    assert!(report.results[0].timed_out);
    assert!(report.results[0].message.contains("1s"));
    assert_eq!(report.results[1].status, CheckStatus::Pass);
}

#[tokio::test]
async fn test_probe_errors_adds_sixth_check() {
    let mock = healthy();
    let mut config = config();
    config.probe_errors = true;
    let doctor = Diagnostician::new(config, mock).unwrap();
    let report = doctor.run().await;
    assert_eq!(report.results.len(), 6);
    assert_eq!(report.results[5].name, "Error Handling");
}

#[tokio::test]
async fn test_open_circuit_does_not_leak_into_next_check() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_get("/v1/models", MockReply::Network("connection refused".to_string()));
    mock.on_post(
        "/inference",
        HttpResponse::new(200).with_header("x-ratelimit-limit-requests", "10"),
    );
    let mut config = config();
    config.circuit_breaker_threshold = 1;
    let doctor = Diagnostician::new(config, mock.clone())
        .unwrap()
        .with_checks(vec![
            Box::new(crate::checks::ConnectivityCheck),
            Box::new(crate::checks::ConnectivityCheck),
            Box::new(crate::checks::RateLimitCheck),
        ]);

    let report = doctor.run().await;
    // each check reached the provider despite the breaker tripping
    assert_eq!(mock.calls_to(&inferdoc_http::Method::GET, "/v1/models"), 2);
    assert_eq!(report.results[1].status, CheckStatus::Fail);
    assert!(!report.results[1].message.contains("circuit"));
    assert_eq!(report.results[2].status, CheckStatus::Pass);
}
