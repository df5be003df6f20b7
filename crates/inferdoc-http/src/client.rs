//! HTTP client wrapper for the inference provider
//!
//! Adds the bearer token, applies the timeout, retries transient failures
//! with backoff and trips a circuit breaker after repeated failures. One
//! instance is built at startup and shared by every check.

use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use crate::error::{Error, Result};
use crate::retry::{retry_with_backoff, RetryConfig};
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::util::mask_api_key;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default provider base URL
pub const DEFAULT_BASE_URL: &str = "https://api.together.xyz";

/// Client wrapper configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// API key sent as a bearer token
    pub api_key: String,
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retry policy for transient failures
    pub retry: RetryConfig,
    /// Circuit breaker settings
    pub circuit_breaker: CircuitBreakerConfig,
}

// SECURITY: Custom Debug implementation to mask API key
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .field("circuit_breaker", &self.circuit_breaker)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration with defaults for everything but the key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
            circuit_breaker: CircuitBreakerConfig::default(),
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Set the circuit breaker configuration
    #[must_use]
    pub fn with_circuit_breaker(mut self, config: CircuitBreakerConfig) -> Self {
        self.circuit_breaker = config;
        self
    }
}

/// Provider client shared by all diagnostic checks
pub struct HttpClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    breaker: CircuitBreaker,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("circuit", &self.breaker.state())
            .finish()
    }
}

impl HttpClient {
    /// Create a client over the given transport
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        if config.timeout.is_zero() {
            return Err(Error::InvalidRequest(
                "timeout must be a positive number of seconds".to_string(),
            ));
        }
        let breaker = CircuitBreaker::new(config.base_url.clone(), config.circuit_breaker.clone());
        Ok(Self {
            config,
            transport,
            breaker,
        })
    }

    /// Client configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The circuit breaker guarding this client
    #[must_use]
    pub fn circuit_breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Absolute URL for a provider path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.config.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    fn build_request(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> Result<HttpRequest> {
        let mut request = HttpRequest::new(method, self.url(path), self.config.timeout);
        let auth = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|_| Error::InvalidRequest("API key contains invalid header characters".to_string()))?;
        request.headers.insert(AUTHORIZATION, auth);
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        request.body = body;
        Ok(request)
    }

    /// Send a request and return the response whatever its status.
    ///
    /// Transient failures are retried per the retry policy; HTTP error
    /// statuses are never retried. Use [`HttpResponse::error_for_status`] to
    /// treat non-2xx as an error.
    #[instrument(skip(self, body), fields(base_url = %self.config.base_url))]
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse> {
        if !self.breaker.can_execute() {
            warn!(path, "Circuit breaker open, request rejected");
            return Err(Error::CircuitOpen(format!(
                "too many recent failures talking to {}",
                self.config.base_url
            )));
        }

        let request = self.build_request(method, path, body)?;
        let outcome = retry_with_backoff(
            &self.config.retry,
            || self.transport.execute(request.clone()),
            Error::is_transient,
        )
        .await;

        match outcome {
            Ok(response) => {
                // any HTTP answer proves the host is reachable
                self.breaker.record_success();
                debug!(path, status = response.status, "Provider responded");
                Ok(response)
            }
            Err(retry_err) => {
                self.breaker.record_failure();
                warn!(
                    path,
                    attempts = retry_err.attempts,
                    error = %retry_err.last_error,
                    "Request failed"
                );
                Err(retry_err.last_error)
            }
        }
    }

    /// GET a provider path
    pub async fn get(&self, path: &str) -> Result<HttpResponse> {
        self.send(Method::GET, path, None).await
    }

    /// POST a JSON body to a provider path
    pub async fn post(&self, path: &str, body: serde_json::Value) -> Result<HttpResponse> {
        self.send(Method::POST, path, Some(body)).await
    }
}
