//! Browser-facing API
//!
//! Routes:
//! - `GET /`: troubleshooting UI
//! - `GET /api/models`, `POST /api/inference`: provider passthrough
//! - `POST /api/diagnose`: full diagnostic run, JSON report
//! - `GET /api/error-codes/:code`, `POST /api/issues`: reference lookups
//!
//! Provider calls use the caller's `Authorization` header; the server never
//! holds a key of its own.

mod diagnose;
mod proxy;
mod reference;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use inferdoc_core::DiagnosticConfig;
use inferdoc_http::util::bearer_token;
use inferdoc_http::Transport;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

const UI_HTML: &str = include_str!("ui.html");

/// Shared state for all API handlers
#[derive(Clone)]
pub struct ApiState {
    /// Settings used for provider calls and diagnostic runs (key ignored)
    pub config: Arc<DiagnosticConfig>,
    /// Network seam, shared by every request
    pub transport: Arc<dyn Transport>,
}

impl ApiState {
    pub fn new(config: DiagnosticConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }
}

/// JSON error body with a status code
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: serde_json::Value,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    /// Upstream answered with a non-2xx status; relay it
    pub fn upstream(what: &str, status: u16, response: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            body: json!({
                "error": format!("{what} failed with status {status}"),
                "status_code": status,
                "response": inferdoc_http::util::truncate_safe(response, 500),
            }),
        }
    }
}

impl From<inferdoc_http::Error> for ApiError {
    fn from(err: inferdoc_http::Error) -> Self {
        use inferdoc_http::Error;
        match err {
            Error::Timeout(_) => Self::new(StatusCode::REQUEST_TIMEOUT, "Request timed out"),
            Error::Network(_) | Error::CircuitOpen(_) => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "Connection error")
            }
            Error::Http { status, body } => Self::upstream("API request", status, &body),
            other => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Unexpected error: {other}"),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Key from the `Authorization` header, with or without the `Bearer ` prefix
pub(crate) fn caller_key(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(bearer_token)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::new(StatusCode::UNAUTHORIZED, "No API key provided"))
}

async fn index() -> Html<&'static str> {
    Html(UI_HTML)
}

/// Build the API router
pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/models", get(proxy::models))
        .route("/api/inference", post(proxy::inference))
        .route("/api/diagnose", post(diagnose::diagnose))
        .route("/api/error-codes/:code", get(reference::error_code))
        .route("/api/issues", post(reference::issue))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
