use super::{inference_payload, CheckContext, DiagnosticCheck, ERROR_HANDLING};
use crate::result::CheckResult;
use async_trait::async_trait;

/// Malformed requests the provider should reject with 400
struct ProbeCase {
    name: &'static str,
    payload: serde_json::Value,
}

fn probe_cases(model: &str) -> Vec<ProbeCase> {
    vec![
        ProbeCase {
            name: "Invalid model",
            payload: inference_payload("non-existent-model", "test", 1, 0.7),
        },
        ProbeCase {
            name: "Empty prompt",
            payload: inference_payload(model, "", 1, 0.7),
        },
        ProbeCase {
            name: "Excessive max_tokens",
            payload: inference_payload(model, "test", 100_000, 0.7),
        },
    ]
}

const EXPECTED_STATUS: u16 = 400;

/// Checks that malformed requests are rejected with a clean 400
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorProbeCheck;

#[async_trait]
impl DiagnosticCheck for ErrorProbeCheck {
    fn name(&self) -> &'static str {
        ERROR_HANDLING
    }

    async fn run(&self, ctx: &CheckContext) -> CheckResult {
        let mut lines = Vec::new();
        let mut unexpected = Vec::new();

        for case in probe_cases(ctx.config.probe_model()) {
            match ctx.client.post(&ctx.config.inference_path, case.payload).await {
                Ok(response) if response.status == EXPECTED_STATUS => {
                    lines.push(format!("✓ {}: correctly rejected", case.name));
                }
                Ok(response) => {
                    lines.push(format!("✗ {}: unexpected status {}", case.name, response.status));
                    unexpected.push(response.status);
                }
                Err(e) => {
                    return CheckResult::from_http_error(ERROR_HANDLING, &e)
                        .with_detail("test_results", lines);
                }
            }
        }

        let result = if unexpected.is_empty() {
            CheckResult::pass(ERROR_HANDLING, "all malformed requests were rejected with 400")
        } else {
            CheckResult::warn(
                ERROR_HANDLING,
                format!(
                    "{} of {} malformed requests were not rejected with 400",
                    unexpected.len(),
                    lines.len()
                ),
            )
            .with_recommendation("Validate request payloads client-side before sending")
        };
        result.with_detail("test_results", lines)
    }
}
