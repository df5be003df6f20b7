//! Provider passthrough

use super::{caller_key, ApiError, ApiState};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use inferdoc_http::{ClientConfig, HttpClient, HttpResponse, RetryConfig};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

const MODELS_TIMEOUT: Duration = Duration::from_secs(30);
const INFERENCE_TIMEOUT: Duration = Duration::from_secs(60);

/// One-shot client for the caller's key. Passthrough requests are never retried.
fn client(state: &ApiState, key: String, timeout: Duration) -> Result<HttpClient, ApiError> {
    let config = ClientConfig::new(key)
        .with_base_url(state.config.base_url.as_str())
        .with_timeout(timeout)
        .with_retry(RetryConfig::new().with_max_retries(0));
    Ok(HttpClient::new(config, state.transport.clone())?)
}

fn relay(what: &str, response: HttpResponse) -> Result<Json<Value>, ApiError> {
    if !response.is_success() {
        return Err(ApiError::upstream(what, response.status, &response.body));
    }
    Ok(Json(response.json::<Value>()?))
}

pub(super) async fn models(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let key = caller_key(&headers)?;
    let client = client(&state, key, MODELS_TIMEOUT)?;
    let response = client.get(&state.config.models_path).await?;
    info!(status = response.status, "proxied models request");
    relay("API request", response)
}

pub(super) async fn inference(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let key = caller_key(&headers)?;
    let client = client(&state, key, INFERENCE_TIMEOUT)?;
    let response = client.post(&state.config.inference_path, payload).await?;
    info!(status = response.status, "proxied inference request");
    relay("Inference request", response)
}
