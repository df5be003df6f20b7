use super::{inference_payload, CheckContext, DiagnosticCheck, RATE_LIMITS};
use crate::result::{CheckResult, CheckStatus, Metric};
use async_trait::async_trait;
use inferdoc_http::{retry_after_secs, HttpResponse, RateLimitSnapshot};
use serde_json::Value;

/// Utilization at which the check warns
pub const RATE_LIMIT_WARN_PERCENT: f64 = 80.0;
/// Utilization at which the check fails
pub const RATE_LIMIT_FAIL_PERCENT: f64 = 95.0;

const NO_HEADERS_MESSAGE: &str = "rate-limit headers not exposed by endpoint.";

/// `pass` below 80 %, `warn` from 80 % up to 95 %, `fail` from 95 %.
#[must_use]
pub fn classify_utilization(percent: f64) -> CheckStatus {
    if percent >= RATE_LIMIT_FAIL_PERCENT {
        CheckStatus::Fail
    } else if percent >= RATE_LIMIT_WARN_PERCENT {
        CheckStatus::Warn
    } else {
        CheckStatus::Pass
    }
}

/// Turn a probe response into the rate-limit result.
#[must_use]
pub fn evaluate_rate_limit(response: &HttpResponse) -> CheckResult {
    let snapshot = RateLimitSnapshot::from_headers(&response.headers);
    let headers: serde_json::Map<String, Value> = snapshot
        .headers()
        .iter()
        .map(|h| (h.name.clone(), Value::from(h.value.as_str())))
        .collect();

    if response.status == 429 {
        let mut result = CheckResult::fail(RATE_LIMITS, "Rate limit exceeded (429 error)")
            .with_status_code(429)
            .with_recommendation(
                "Implement exponential backoff or request rate limit increase at together.ai/forms/rate-limit-increase",
            )
            .with_detail("rate_limit_headers", Value::Object(headers));
        if let Some(secs) = retry_after_secs(&response.headers) {
            result = result.with_detail("retry_after_secs", secs);
        }
        return result;
    }

    let mut result = if snapshot.is_empty() {
        CheckResult::warn(RATE_LIMITS, NO_HEADERS_MESSAGE).with_recommendation(
            "Monitor 429 responses instead; the endpoint does not report remaining quota",
        )
    } else if let Some(utilization) = snapshot.utilization() {
        let percent = utilization.percent();
        let status = classify_utilization(percent);
        let message = format!(
            "{} utilization {:.1}% ({}/{})",
            utilization.dimension, percent, utilization.used, utilization.limit
        );
        let result = CheckResult::new(RATE_LIMITS, status, message)
            .with_metric(Metric::new("rate_limit_utilization", percent, "%"))
            .with_detail("dimension", utilization.dimension.to_string())
            .with_detail("rate_limit_headers", Value::Object(headers));
        match status {
            CheckStatus::Pass => result,
            CheckStatus::Warn => result.with_recommendation(
                "Approaching the rate limit - add request queuing or request a higher tier",
            ),
            CheckStatus::Fail => result.with_recommendation(
                "Rate limit nearly exhausted - reduce request frequency and add exponential backoff",
            ),
        }
    } else {
        CheckResult::pass(RATE_LIMITS, "rate-limit headers present; utilization not reported")
            .with_detail("rate_limit_headers", Value::Object(headers))
    };

    if !response.is_success() {
        result = result.with_status_code(response.status);
        if result.status == CheckStatus::Pass {
            result.status = CheckStatus::Warn;
            result.message = format!("unexpected status code {}: {}", response.status, result.message);
        }
    }
    result
}

/// Dedicated 1-token inference probe whose headers are inspected
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimitCheck;

#[async_trait]
impl DiagnosticCheck for RateLimitCheck {
    fn name(&self) -> &'static str {
        RATE_LIMITS
    }

    async fn run(&self, ctx: &CheckContext) -> CheckResult {
        let payload = inference_payload(ctx.config.probe_model(), "Hello", 1, 0.1);
        match ctx.client.post(&ctx.config.inference_path, payload).await {
            Ok(response) => evaluate_rate_limit(&response),
            Err(e) => CheckResult::from_http_error(RATE_LIMITS, &e)
                .with_recommendation("Check API connectivity and model availability"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::monitoring;

    fn with_usage(used: u64, limit: u64) -> HttpResponse {
        HttpResponse::new(200)
            .with_header("x-ratelimit-limit-requests", &limit.to_string())
            .with_header("x-ratelimit-remaining-requests", &(limit - used).to_string())
    }

    #[test]
    fn test_thresholds_match_monitoring_guide() {
        let usage = monitoring().threshold("rate_limit_usage").unwrap();
        assert_eq!(usage.warning, RATE_LIMIT_WARN_PERCENT);
        assert_eq!(usage.critical, RATE_LIMIT_FAIL_PERCENT);
    }

    #[test]
    fn test_utilization_boundaries() {
        assert_eq!(classify_utilization(79.9), CheckStatus::Pass);
        assert_eq!(classify_utilization(80.0), CheckStatus::Warn);
        assert_eq!(classify_utilization(94.99), CheckStatus::Warn);
        assert_eq!(classify_utilization(95.0), CheckStatus::Fail);
    }

    #[test]
    fn test_evaluate_boundaries_from_headers() {
        assert_eq!(evaluate_rate_limit(&with_usage(799, 1000)).status, CheckStatus::Pass);
        assert_eq!(evaluate_rate_limit(&with_usage(800, 1000)).status, CheckStatus::Warn);
        assert_eq!(evaluate_rate_limit(&with_usage(950, 1000)).status, CheckStatus::Fail);
    }

    #[test]
    fn test_metric_and_headers_reported() {
        let result = evaluate_rate_limit(&with_usage(25, 100));
        let metric = result.metric.unwrap();
        assert_eq!(metric.value, 25.0);
        assert_eq!(metric.unit, "%");
        assert_eq!(
            result.details["rate_limit_headers"]["x-ratelimit-limit-requests"],
            "100"
        );
    }

    #[test]
    fn test_no_headers_warns() {
        let result = evaluate_rate_limit(&HttpResponse::new(200));
        assert_eq!(result.status, CheckStatus::Warn);
        assert_eq!(result.message, "rate-limit headers not exposed by endpoint.");
    }

    #[test]
    fn test_429_fails_regardless_of_headers() {
        let response = HttpResponse::new(429)
            .with_header("x-ratelimit-limit-requests", "100")
            .with_header("x-ratelimit-remaining-requests", "90")
            .with_header("retry-after", "12");
        let result = evaluate_rate_limit(&response);
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.raw_status_code, Some(429));
        assert_eq!(result.details["retry_after_secs"], 12);
    }

    #[test]
    fn test_headers_without_utilization_pass() {
        let response = HttpResponse::new(200).with_header("x-ratelimit-reset", "30");
        assert_eq!(evaluate_rate_limit(&response).status, CheckStatus::Pass);
    }

    #[test]
    fn test_unexpected_status_downgrades_pass() {
        let mut response = with_usage(10, 100);
        response.status = 500;
        let result = evaluate_rate_limit(&response);
        assert_eq!(result.status, CheckStatus::Warn);
        assert_eq!(result.raw_status_code, Some(500));
    }
}
