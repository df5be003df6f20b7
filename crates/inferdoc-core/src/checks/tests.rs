use super::*;
use crate::result::CheckStatus;
use inferdoc_http::mock::{MockReply, ScriptedTransport};
use inferdoc_http::{HttpResponse, Method, RetryConfig};
use serde_json::json;
use std::time::Duration;

fn context(mock: Arc<ScriptedTransport>, config: DiagnosticConfig) -> CheckContext {
    let client_config = config
        .client_config()
        .with_retry(RetryConfig::new().with_max_retries(0));
    let client = HttpClient::new(client_config, mock).unwrap();
    CheckContext::new(Arc::new(client), Arc::new(config))
}

fn config() -> DiagnosticConfig {
    let mut config = DiagnosticConfig::with_api_key("tgp_test_key_1234567890");
    config.base_url = "https://api.example.test".to_string();
    config.models_to_test = vec!["a-7b".to_string(), "b-13b".to_string()];
    config
}

fn model_list() -> HttpResponse {
    HttpResponse::new(200).with_json(json!([{"id": "a-7b"}, {"id": "b-13b"}, {"id": "c-70b"}]))
}

fn inference_ok() -> HttpResponse {
    HttpResponse::new(200)
        .with_header("x-ratelimit-limit-requests", "100")
        .with_header("x-ratelimit-remaining-requests", "99")
        .with_json(json!({
            "output": {"choices": [{"text": "Paris"}]},
            "usage": {"prompt_tokens": 8, "completion_tokens": 5}
        }))
}

#[tokio::test]
async fn test_all_checks_pass_on_healthy_endpoint() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_get("/v1/models", model_list());
    mock.on_post("/inference", inference_ok());
    let mut config = config();
    config.probe_errors = false;
    let ctx = context(mock.clone(), config.clone());

    for check in default_checks(&config) {
        let result = check.run(&ctx).await;
        assert_eq!(result.status, CheckStatus::Pass, "{}: {}", result.name, result.message);
        assert_eq!(result.name, check.name());
    }
}

#[tokio::test]
async fn test_connectivity_fails_on_network_error() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_get("/v1/models", MockReply::Network("dns failure".to_string()));
    let ctx = context(mock, config());

    let result = ConnectivityCheck.run(&ctx).await;
    assert_eq!(result.status, CheckStatus::Fail);
    assert!(result.message.contains("dns failure"));
    assert!(result.recommendation.unwrap().contains("firewall"));
}

#[tokio::test]
async fn test_connectivity_preserves_status_code() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_get("/v1/models", HttpResponse::new(503).with_body("overloaded"));
    let ctx = context(mock, config());

    let result = ConnectivityCheck.run(&ctx).await;
    assert_eq!(result.status, CheckStatus::Fail);
    assert_eq!(result.raw_status_code, Some(503));
    assert_eq!(result.details["response"], "overloaded");
}

#[tokio::test]
async fn test_connectivity_timeout_is_flagged() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_get("/v1/models", MockReply::Timeout);
    let ctx = context(mock, config());

    let result = ConnectivityCheck.run(&ctx).await;
    assert_eq!(result.status, CheckStatus::Fail);
    assert!(result.timed_out);
}

#[tokio::test]
async fn test_auth_401() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_get("/v1/models", HttpResponse::new(401));
    let ctx = context(mock, config());

    let result = AuthCheck.run(&ctx).await;
    assert_eq!(result.status, CheckStatus::Fail);
    assert_eq!(result.message, "invalid or missing API key");
    assert_eq!(result.raw_status_code, Some(401));
}

#[tokio::test]
async fn test_auth_other_status() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_get("/v1/models", HttpResponse::new(403));
    let ctx = context(mock, config());

    let result = AuthCheck.run(&ctx).await;
    assert_eq!(result.status, CheckStatus::Fail);
    assert_eq!(result.message, "authentication check failed with status 403");
}

#[tokio::test]
async fn test_missing_model_fails_with_name() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_get(
        "/v1/models",
        HttpResponse::new(200).with_json(json!({"data": [{"id": "a-7b"}]})),
    );
    let mut config = config();
    config.models_to_test = vec!["a-7b".to_string(), "foo-7b".to_string()];
    let ctx = context(mock, config);

    let result = ModelAvailabilityCheck.run(&ctx).await;
    assert_eq!(result.status, CheckStatus::Fail);
    assert!(result.message.contains("foo-7b"));
    assert!(!result.message.contains("a-7b"));
    assert_eq!(result.details["models"]["foo-7b"], "unavailable");
    assert_eq!(result.details["models"]["a-7b"], "available");
}

#[tokio::test]
async fn test_partial_listing_warns() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_get(
        "/v1/models",
        HttpResponse::new(200).with_json(json!([{"id": "a-7b"}, {"id": "b-13b"}, {"display": "?"}])),
    );
    let ctx = context(mock, config());

    let result = ModelAvailabilityCheck.run(&ctx).await;
    assert_eq!(result.status, CheckStatus::Warn);
}

#[tokio::test]
async fn test_unparseable_listing_fails() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_get("/v1/models", HttpResponse::new(200).with_body("<html>maintenance</html>"));
    let ctx = context(mock, config());

    let result = ModelAvailabilityCheck.run(&ctx).await;
    assert_eq!(result.status, CheckStatus::Fail);
}

#[tokio::test]
async fn test_performance_reports_metric_and_tokens() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_post("/inference", inference_ok());
    let mut config = config();
    config.perf_test_count = 7;
    config.concurrent_requests = 3;
    let ctx = context(mock.clone(), config);

    let result = PerformanceCheck.run(&ctx).await;
    assert_eq!(result.status, CheckStatus::Pass);
    assert_eq!(result.metric.as_ref().unwrap().name, "avg_latency");
    assert_eq!(result.details["successful_requests"], 7);
    assert_eq!(result.details["total_completion_tokens"], 35);
    assert_eq!(mock.calls_to(&Method::POST, "/inference"), 7);

    let prompts: Vec<String> = mock
        .calls()
        .iter()
        .filter_map(|c| c.body.as_ref()?["prompt"].as_str().map(String::from))
        .collect();
    for prompt in PERF_PROMPTS {
        assert!(prompts.iter().any(|p| p == prompt));
    }
}

#[tokio::test]
async fn test_performance_fails_on_any_error() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_post("/inference", inference_ok())
        .on_post("/inference", HttpResponse::new(500));
    let mut config = config();
    config.perf_test_count = 3;
    config.concurrent_requests = 1;
    let ctx = context(mock, config);

    let result = PerformanceCheck.run(&ctx).await;
    assert_eq!(result.status, CheckStatus::Fail);
    assert_eq!(result.raw_status_code, Some(500));
    assert_eq!(result.details["failed_requests"], 2);
}

#[tokio::test]
async fn test_performance_slow_responses_warn() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_post(
        "/inference",
        MockReply::Delayed(Duration::from_millis(30), inference_ok()),
    );
    let mut config = config();
    config.perf_test_count = 1;
    config.latency_threshold_ms = Some(20);
    let ctx = context(mock, config);

    let result = PerformanceCheck.run(&ctx).await;
    assert_ne!(result.status, CheckStatus::Pass);
    assert!(result.metric.unwrap().value >= 30.0);
}

#[tokio::test]
async fn test_throughput_ignores_samples_without_usage() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_post(
        "/inference",
        MockReply::Delayed(
            Duration::from_millis(300),
            HttpResponse::new(200).with_json(json!({"output": {"choices": [{"text": "Paris"}]}})),
        ),
    )
    .on_post(
        "/inference",
        MockReply::Delayed(Duration::from_millis(10), inference_ok()),
    );
    let mut config = config();
    config.perf_test_count = 2;
    config.concurrent_requests = 1;
    let ctx = context(mock, config);

    let result = PerformanceCheck.run(&ctx).await;
    assert_eq!(result.details["total_completion_tokens"], 5);
    // 5 tokens over the 10ms sample only, not over 310ms
    let rate = result.details["tokens_per_second"].as_f64().unwrap();
    assert!(rate > 50.0 && rate <= 500.0, "tokens/s {rate}");
}

#[tokio::test]
async fn test_rate_limit_probe_uses_one_token() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_post("/inference", inference_ok());
    let ctx = context(mock.clone(), config());

    let result = RateLimitCheck.run(&ctx).await;
    assert_eq!(result.status, CheckStatus::Pass);

    let calls = mock.calls();
    let body = calls[0].body.as_ref().unwrap();
    assert_eq!(body["max_tokens"], 1);
    assert_eq!(body["model"], "a-7b");
}

#[tokio::test]
async fn test_error_probe() {
    let mock = Arc::new(ScriptedTransport::new());
    mock.on_post("/inference", HttpResponse::new(400));
    let ctx = context(mock.clone(), config());
    let result = ErrorProbeCheck.run(&ctx).await;
    assert_eq!(result.status, CheckStatus::Pass);
    assert_eq!(mock.call_count(), 3);

    let mock = Arc::new(ScriptedTransport::new());
    mock.on_post("/inference", HttpResponse::new(400))
        .on_post("/inference", HttpResponse::new(200));
    let ctx = context(mock, config());
    let result = ErrorProbeCheck.run(&ctx).await;
    assert_eq!(result.status, CheckStatus::Warn);
}

#[test]
fn test_default_checks_order() {
    let mut config = config();
    let names: Vec<_> = default_checks(&config).iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec![CONNECTIVITY, AUTHENTICATION, MODEL_AVAILABILITY, PERFORMANCE, RATE_LIMITS]
    );

    config.probe_errors = true;
    assert_eq!(default_checks(&config).last().unwrap().name(), ERROR_HANDLING);
}
