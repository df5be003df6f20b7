//! Inferdoc HTTP - provider client plumbing
//!
//! This crate provides the network side of inferdoc:
//! - Client: bearer-authenticated wrapper with timeout, retry and circuit breaker
//! - Transport: seam over `reqwest` (scripted in tests via `mock`, behind the
//!   `mock` feature)
//! - Retry: exponential backoff with jitter for transient failures
//! - Rate limits: extraction of rate-limit headers and utilization

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod circuit_breaker;
pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod ratelimit;
pub mod retry;
pub mod transport;
pub mod util;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use client::{ClientConfig, HttpClient, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use ratelimit::{
    is_rate_limit_header, retry_after_secs, LimitDimension, RateLimitHeader, RateLimitSnapshot,
    Utilization,
};
pub use retry::{retry_with_backoff, RetryConfig, RetryError};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

pub use reqwest::header::HeaderMap;
pub use reqwest::Method;
