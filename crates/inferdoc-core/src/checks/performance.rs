use super::{inference_payload, CheckContext, DiagnosticCheck, PERFORMANCE};
use crate::reference::popular_model;
use crate::result::{CheckResult, CheckStatus, Metric};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

/// Prompts rotated over the timed requests
pub const PERF_PROMPTS: [&str; 5] = [
    "What is the capital of France?",
    "Write a haiku about technology.",
    "Explain quantum computing in simple terms.",
    "Describe the benefits of renewable energy.",
    "How does machine learning work?",
];

const PERF_MAX_TOKENS: u32 = 50;
const PERF_TEMPERATURE: f64 = 0.7;

/// Classify an average latency against the threshold.
///
/// `pass` below the threshold, `warn` from the threshold up to and including
/// twice the threshold, `fail` above that.
#[must_use]
pub fn classify_latency(avg_ms: f64, threshold_ms: f64) -> CheckStatus {
    if avg_ms < threshold_ms {
        CheckStatus::Pass
    } else if avg_ms <= threshold_ms * 2.0 {
        CheckStatus::Warn
    } else {
        CheckStatus::Fail
    }
}

#[derive(Debug)]
struct Sample {
    latency_ms: f64,
    completion_tokens: Option<u64>,
    error: Option<String>,
    status: Option<u16>,
    timed_out: bool,
}

fn completion_tokens(body: &Value) -> Option<u64> {
    body.pointer("/usage/completion_tokens")
        .or_else(|| body.pointer("/output/usage/completion_tokens"))
        .and_then(Value::as_u64)
}

/// Timed inference calls issued through a bounded pool
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceCheck;

impl PerformanceCheck {
    async fn sample(ctx: &CheckContext, payload: Value) -> Sample {
        let start = Instant::now();
        let outcome = ctx.client.post(&ctx.config.inference_path, payload).await;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        match outcome {
            Ok(response) if response.is_success() => Sample {
                latency_ms,
                completion_tokens: response
                    .json::<Value>()
                    .ok()
                    .as_ref()
                    .and_then(completion_tokens),
                error: None,
                status: Some(response.status),
                timed_out: false,
            },
            Ok(response) => Sample {
                latency_ms,
                completion_tokens: None,
                error: Some(format!("status {}", response.status)),
                status: Some(response.status),
                timed_out: false,
            },
            Err(e) => Sample {
                latency_ms,
                completion_tokens: None,
                error: Some(e.to_string()),
                status: e.status_code(),
                timed_out: e.is_timeout(),
            },
        }
    }
}

#[async_trait]
impl DiagnosticCheck for PerformanceCheck {
    fn name(&self) -> &'static str {
        PERFORMANCE
    }

    async fn run(&self, ctx: &CheckContext) -> CheckResult {
        let config = &ctx.config;
        let model = config.probe_model();
        let threshold = config.latency_threshold_ms() as f64;
        let count = config.perf_test_count as usize;

        debug!(
            model,
            requests = count,
            concurrency = config.concurrent_requests,
            "Running performance probe"
        );

        let samples: Vec<Sample> = stream::iter(0..count)
            .map(|i| {
                let prompt = PERF_PROMPTS[i % PERF_PROMPTS.len()];
                Self::sample(
                    ctx,
                    inference_payload(model, prompt, PERF_MAX_TOKENS, PERF_TEMPERATURE),
                )
            })
            .buffered(config.concurrent_requests.max(1))
            .collect()
            .await;

        let (ok, failed): (Vec<&Sample>, Vec<&Sample>) =
            samples.iter().partition(|s| s.error.is_none());
        let errors: Vec<String> = failed.iter().filter_map(|s| s.error.clone()).collect();

        let mut result = if ok.is_empty() {
            CheckResult::fail(PERFORMANCE, "all performance requests failed")
                .with_recommendation("Check model availability and API status")
        } else {
            let latencies: Vec<f64> = ok.iter().map(|s| s.latency_ms).collect();
            let avg = latencies.iter().sum::<f64>() / latencies.len() as f64;
            let min = latencies.iter().copied().fold(f64::INFINITY, f64::min);
            let max = latencies.iter().copied().fold(0.0, f64::max);

            let status = if failed.is_empty() {
                classify_latency(avg, threshold)
            } else {
                CheckStatus::Fail
            };
            let message = if failed.is_empty() {
                format!("avg {avg:.0}ms, min {min:.0}ms, max {max:.0}ms over {} requests", ok.len())
            } else {
                format!(
                    "{} of {} requests failed; avg {avg:.0}ms over the rest",
                    failed.len(),
                    samples.len()
                )
            };

            let mut result = CheckResult::new(PERFORMANCE, status, message)
                .with_metric(Metric::new("avg_latency", avg, "ms"))
                .with_detail("min_latency_ms", min)
                .with_detail("max_latency_ms", max);

            // throughput only over samples that reported usage
            let counted: Vec<(u64, f64)> = ok
                .iter()
                .filter_map(|s| s.completion_tokens.map(|t| (t, s.latency_ms)))
                .collect();
            if !counted.is_empty() {
                let total: u64 = counted.iter().map(|(t, _)| t).sum();
                let secs: f64 = counted.iter().map(|(_, ms)| ms).sum::<f64>() / 1000.0;
                if secs > 0.0 {
                    result = result.with_detail("tokens_per_second", total as f64 / secs);
                }
                result = result.with_detail("total_completion_tokens", total);
            }

            match status {
                CheckStatus::Warn => result.with_recommendation(format!(
                    "Response times exceed {threshold:.0}ms threshold - consider using smaller models or dedicated instances"
                )),
                CheckStatus::Fail if failed.is_empty() => result.with_recommendation(
                    "Response times are extremely high - check model availability and system status",
                ),
                CheckStatus::Fail => result.with_recommendation("Check model availability and API status"),
                CheckStatus::Pass => result,
            }
        };

        if let Some(code) = failed.iter().find_map(|s| s.status) {
            result = result.with_status_code(code);
        }
        if !failed.is_empty() && failed.iter().all(|s| s.timed_out) {
            result = result.with_timed_out(true);
        }

        result = result
            .with_detail("model", model)
            .with_detail("threshold_ms", threshold)
            .with_detail("successful_requests", ok.len())
            .with_detail("failed_requests", failed.len())
            .with_detail("concurrent_requests", config.concurrent_requests);
        if let Some(profile) = popular_model(model) {
            result = result.with_detail("typical_latency_ms", profile.typical_latency_ms);
        }
        if !errors.is_empty() {
            result = result.with_detail("errors", errors);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify_latency(4_999.9, 5_000.0), CheckStatus::Pass);
        assert_eq!(classify_latency(5_000.0, 5_000.0), CheckStatus::Warn);
        assert_eq!(classify_latency(10_000.0, 5_000.0), CheckStatus::Warn);
        assert_eq!(classify_latency(10_000.1, 5_000.0), CheckStatus::Fail);
    }

    #[test]
    fn test_completion_tokens_locations() {
        assert_eq!(completion_tokens(&json!({"usage": {"completion_tokens": 12}})), Some(12));
        assert_eq!(
            completion_tokens(&json!({"output": {"usage": {"completion_tokens": 7}}})),
            Some(7)
        );
        assert_eq!(completion_tokens(&json!({"output": {"choices": []}})), None);
    }
}
