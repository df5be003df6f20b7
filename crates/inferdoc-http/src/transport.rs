//! Transport seam between the client wrapper and the network
//!
//! [`ReqwestTransport`] owns the pooled `reqwest::Client` for the lifetime of
//! the process; tests substitute a scripted transport.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::debug;

/// Maximum idle connections kept per host
const POOL_MAX_IDLE_PER_HOST: usize = 20;

/// A fully resolved outgoing request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Optional JSON body
    pub body: Option<serde_json::Value>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HttpRequest {
    /// Create a request without headers or body
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
            timeout,
        }
    }

    /// Path component of the URL (everything after the authority)
    #[must_use]
    pub fn path(&self) -> &str {
        let after_scheme = self
            .url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.url);
        after_scheme
            .find('/')
            .map(|idx| &after_scheme[idx..])
            .unwrap_or("/")
    }
}

/// A received response, whatever its status
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as text
    pub body: String,
    /// Wall-clock time until the body was read
    pub elapsed: Duration,
}

impl HttpResponse {
    /// Create an empty response with the given status
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: String::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Attach a header. Invalid names or values are ignored.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set a JSON body
    #[must_use]
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = body.to_string();
        self
    }

    /// Set a text body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into [`Error::Http`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Http {
                status: self.status,
                body: crate::util::truncate_safe(&self.body, 500).to_string(),
            })
        }
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

/// Executes requests against the network (or a stand-in)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request. Non-2xx statuses are returned as responses, not
    /// errors; only network-level failures produce `Err`.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Production transport backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build the shared client and its connection pool
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .user_agent(concat!("inferdoc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::InvalidRequest(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let timeout = request.timeout;
        let start = Instant::now();

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers)
            .timeout(timeout);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                Error::Timeout(timeout.as_millis() as u64)
            } else {
                Error::from(e)
            }
        };

        let response = builder.send().await.map_err(map_err)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(map_err)?;
        let elapsed = start.elapsed();

        debug!(
            method = %request.method,
            url = %request.url,
            status,
            elapsed_ms = elapsed.as_millis() as u64,
            "HTTP request completed"
        );

        Ok(HttpResponse {
            status,
            headers,
            body,
            elapsed,
        })
    }
}
