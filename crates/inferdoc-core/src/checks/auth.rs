use super::{CheckContext, DiagnosticCheck, AUTHENTICATION};
use crate::result::CheckResult;
use async_trait::async_trait;
use inferdoc_http::util::mask_api_key;

/// Authenticated request to a minimal endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthCheck;

#[async_trait]
impl DiagnosticCheck for AuthCheck {
    fn name(&self) -> &'static str {
        AUTHENTICATION
    }

    async fn run(&self, ctx: &CheckContext) -> CheckResult {
        let key = mask_api_key(&ctx.client.config().api_key);

        match ctx.client.get(&ctx.config.auth_probe_path).await {
            Ok(response) if response.is_success() => {
                CheckResult::pass(AUTHENTICATION, format!("API key {} accepted", key))
                    .with_status_code(response.status)
            }
            Ok(response) if response.status == 401 => {
                CheckResult::fail(AUTHENTICATION, "invalid or missing API key")
                    .with_status_code(401)
                    .with_detail("api_key", key)
                    .with_recommendation(
                        "Check your API key in Settings > API Keys at api.together.ai",
                    )
            }
            Ok(response) => CheckResult::fail(
                AUTHENTICATION,
                format!("authentication check failed with status {}", response.status),
            )
            .with_status_code(response.status),
            Err(e) => CheckResult::from_http_error(AUTHENTICATION, &e)
                .with_recommendation("Check API connectivity before retrying authentication"),
        }
    }
}
