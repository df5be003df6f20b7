use super::{CheckContext, DiagnosticCheck, CONNECTIVITY};
use crate::result::CheckResult;
use async_trait::async_trait;
use inferdoc_http::util::truncate_safe;
use std::time::Instant;

/// GET on the model listing to verify the endpoint is reachable
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectivityCheck;

#[async_trait]
impl DiagnosticCheck for ConnectivityCheck {
    fn name(&self) -> &'static str {
        CONNECTIVITY
    }

    async fn run(&self, ctx: &CheckContext) -> CheckResult {
        let start = Instant::now();
        let outcome = ctx.client.get(&ctx.config.models_path).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match outcome {
            Ok(response) if response.is_success() => CheckResult::pass(
                CONNECTIVITY,
                format!(
                    "connected to {} (status {})",
                    ctx.client.config().base_url,
                    response.status
                ),
            )
            .with_status_code(response.status)
            .with_detail("response_time_ms", elapsed_ms),
            Ok(response) => CheckResult::fail(
                CONNECTIVITY,
                format!("API request failed with status {}", response.status),
            )
            .with_status_code(response.status)
            .with_detail("response", truncate_safe(&response.body, 200))
            .with_detail("response_time_ms", elapsed_ms)
            .with_recommendation("Check Together AI status page at status.together.ai"),
            Err(e) => {
                let recommendation = if e.is_timeout() {
                    "Check your network connection and Together AI status"
                } else {
                    "Check your internet connection and firewall settings"
                };
                CheckResult::from_http_error(CONNECTIVITY, &e)
                    .with_recommendation(recommendation)
            }
        }
    }
}
