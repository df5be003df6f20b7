//! Retry logic with exponential backoff
//!
//! Only failures the caller classifies as retryable are retried; the delay
//! grows exponentially per attempt and carries 10–30% random jitter.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Lower bound of the jitter fraction added to each delay
const JITTER_MIN: f64 = 0.1;
/// Upper bound of the jitter fraction added to each delay
const JITTER_MAX: f64 = 0.3;

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Number of retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Add random jitter to delays
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum retries
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set initial delay
    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set maximum delay
    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set backoff multiplier
    #[must_use]
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Enable or disable jitter
    #[must_use]
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Total attempts including the first one
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Longest total time spent sleeping between attempts, with maximum jitter
    #[must_use]
    pub fn max_total_delay(&self) -> Duration {
        let jitter = if self.jitter { 1.0 + JITTER_MAX } else { 1.0 };
        let total_ms: f64 = (1..=self.max_retries)
            .map(|attempt| self.base_delay_ms(attempt) * jitter)
            .sum();
        Duration::from_millis(total_ms.ceil() as u64)
    }

    fn base_delay_ms(&self, attempt: u32) -> f64 {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let base_ms =
            self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(exponent);
        base_ms.min(self.max_delay.as_millis() as f64)
    }

    /// Delay before retrying after the given (1-based) failed attempt
    fn calculate_delay(&self, attempt: u32) -> Duration {
        let delay_ms = self.base_delay_ms(attempt);

        let final_ms = if self.jitter {
            let fraction = rand::thread_rng().gen_range(JITTER_MIN..JITTER_MAX);
            delay_ms + delay_ms * fraction
        } else {
            delay_ms
        };

        Duration::from_millis(final_ms as u64)
    }
}

/// Error type for retry operations
#[derive(Debug)]
pub struct RetryError<E> {
    /// The last error encountered
    pub last_error: E,
    /// Total number of attempts made
    pub attempts: u32,
}

impl<E: std::fmt::Display> std::fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "operation failed after {} attempts: {}",
            self.attempts, self.last_error
        )
    }
}

impl<E: std::fmt::Debug + std::fmt::Display> std::error::Error for RetryError<E> {}

/// Execute an async operation with retry logic
///
/// `is_retryable` decides whether a failure is transient; anything else is
/// returned immediately after the first attempt.
pub async fn retry_with_backoff<T, E, F, Fut, R>(
    config: &RetryConfig,
    mut operation: F,
    is_retryable: R,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
    E: std::fmt::Debug,
{
    let max_attempts = config.max_attempts();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(attempt, "Operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) => {
                if attempt >= max_attempts || !is_retryable(&e) {
                    debug!(attempt, error = ?e, "Operation failed, no more retries");
                    return Err(RetryError {
                        last_error: e,
                        attempts: attempt,
                    });
                }

                let delay = config.calculate_delay(attempt);
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = ?e,
                    "Attempt failed, retrying"
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests;
