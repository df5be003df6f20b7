//! Circuit breaker guarding the provider endpoint
//!
//! - Closed: requests pass through, consecutive failures are counted
//! - Open: the failure threshold was reached, requests are rejected
//! - HalfOpen: the reset timeout elapsed, a single trial request is let through
//!   and every other caller is rejected until it settles

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Circuit breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation
    Closed,
    /// Requests are rejected until the reset timeout elapses
    Open,
    /// A single trial request decides whether to close or reopen
    HalfOpen,
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
            Self::HalfOpen => write!(f, "half-open"),
        }
    }
}

/// Configuration for circuit breaker
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before opening the circuit
    pub failure_threshold: u32,
    /// Time spent open before allowing a trial request
    pub reset_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            reset_timeout: Duration::from_secs(60),
        }
    }
}

impl CircuitBreakerConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set failure threshold
    #[must_use]
    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = threshold.max(1);
        self
    }

    /// Set reset timeout
    #[must_use]
    pub fn with_reset_timeout(mut self, timeout: Duration) -> Self {
        self.reset_timeout = timeout;
        self
    }
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    failures: u32,
    opened_at: Option<Instant>,
    trial_in_flight: bool,
}

/// Circuit breaker for fault tolerance
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    /// Create a new circuit breaker
    #[must_use]
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                failures: 0,
                opened_at: None,
                trial_in_flight: false,
            }),
        }
    }

    /// Create with default configuration
    #[must_use]
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self::new(name, CircuitBreakerConfig::default())
    }

    /// Get the circuit breaker name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> MutexGuard<'_, BreakerInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get the current state
    #[must_use]
    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    /// Current consecutive failure count
    #[must_use]
    pub fn failure_count(&self) -> u32 {
        self.lock().failures
    }

    /// Check if the circuit allows a request
    ///
    /// While half-open only the first caller is admitted; the rest are
    /// rejected until that request records a success or a failure.
    #[must_use]
    pub fn can_execute(&self) -> bool {
        let mut inner = self.lock();
        let state = inner.state;
        match state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let elapsed = inner.opened_at.map(|t| t.elapsed()).unwrap_or_default();
                if elapsed < self.config.reset_timeout {
                    return false;
                }
                info!(name = %self.name, "Circuit breaker half-open, sending trial request");
                inner.state = CircuitState::HalfOpen;
                inner.trial_in_flight = true;
                true
            }
            CircuitState::HalfOpen if inner.trial_in_flight => false,
            CircuitState::HalfOpen => {
                inner.trial_in_flight = true;
                true
            }
        }
    }

    /// Record a successful operation
    pub fn record_success(&self) {
        let mut inner = self.lock();
        if inner.state != CircuitState::Closed {
            info!(name = %self.name, "Circuit breaker closed, resuming requests");
        }
        inner.state = CircuitState::Closed;
        inner.failures = 0;
        inner.opened_at = None;
        inner.trial_in_flight = false;
    }

    /// Record a failed operation
    pub fn record_failure(&self) {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::Closed => {
                inner.failures += 1;
                debug!(
                    name = %self.name,
                    failures = inner.failures,
                    threshold = self.config.failure_threshold,
                    "Circuit breaker failure recorded"
                );
                if inner.failures >= self.config.failure_threshold {
                    warn!(
                        name = %self.name,
                        failures = inner.failures,
                        "Circuit breaker opened after repeated failures"
                    );
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(Instant::now());
                }
            }
            CircuitState::HalfOpen => {
                warn!(name = %self.name, "Trial request failed, circuit breaker reopened");
                inner.state = CircuitState::Open;
                inner.opened_at = Some(Instant::now());
                inner.trial_in_flight = false;
            }
            CircuitState::Open => {}
        }
    }

    /// Reset the circuit breaker to closed state
    pub fn reset(&self) {
        self.record_success();
    }
}
