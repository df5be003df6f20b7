use super::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

#[test]
fn test_retry_config_defaults() {
    let config = RetryConfig::default();
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.max_attempts(), 4);
    assert_eq!(config.initial_delay, Duration::from_secs(1));
    assert_eq!(config.max_delay, Duration::from_secs(60));
    assert_eq!(config.backoff_multiplier, 2.0);
}

#[test]
fn test_retry_config_builder() {
    let config = RetryConfig::new()
        .with_max_retries(5)
        .with_initial_delay(Duration::from_millis(200))
        .with_max_delay(Duration::from_secs(30))
        .with_backoff_multiplier(3.0)
        .with_jitter(false);

    assert_eq!(config.max_retries, 5);
    assert_eq!(config.initial_delay, Duration::from_millis(200));
    assert_eq!(config.max_delay, Duration::from_secs(30));
    assert_eq!(config.backoff_multiplier, 3.0);
    assert!(!config.jitter);
}

#[test]
fn test_calculate_delay() {
    let config = RetryConfig::new()
        .with_initial_delay(Duration::from_millis(100))
        .with_jitter(false);

    assert_eq!(config.calculate_delay(1), Duration::from_millis(100));
    assert_eq!(config.calculate_delay(2), Duration::from_millis(200));
    assert_eq!(config.calculate_delay(3), Duration::from_millis(400));
}

#[test]
fn test_delay_respects_max() {
    let config = RetryConfig::new()
        .with_initial_delay(Duration::from_secs(1))
        .with_max_delay(Duration::from_secs(5))
        .with_backoff_multiplier(10.0)
        .with_jitter(false);

    // 1 * 10^2 = 100 seconds, capped at 5
    assert_eq!(config.calculate_delay(3), Duration::from_secs(5));
}

#[test]
fn test_max_total_delay() {
    let plain = RetryConfig::new().with_jitter(false);
    // 1 + 2 + 4 seconds
    assert_eq!(plain.max_total_delay(), Duration::from_secs(7));

    let jittered = RetryConfig::new().max_total_delay().as_millis();
    assert!((9100..=9101).contains(&jittered), "got {jittered}ms");

    assert_eq!(RetryConfig::new().with_max_retries(0).max_total_delay(), Duration::ZERO);
}

#[test]
fn test_jitter_stays_in_band() {
    let config = RetryConfig::new().with_initial_delay(Duration::from_millis(1000));

    for _ in 0..50 {
        let delay = config.calculate_delay(1).as_millis();
        assert!((1100..=1300).contains(&delay), "delay {delay} out of band");
    }
}

#[tokio::test]
async fn test_retry_success_first_attempt() {
    let config = RetryConfig::new().with_max_retries(3);
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result: Result<i32, RetryError<&str>> = retry_with_backoff(
        &config,
        || {
            let c = counter_clone.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<i32, &str>(42)
            }
        },
        |_| true,
    )
    .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_retry_success_after_failures() {
    let config = RetryConfig::new()
        .with_max_retries(3)
        .with_initial_delay(Duration::from_millis(1));

    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result: Result<i32, RetryError<&str>> = retry_with_backoff(
        &config,
        || {
            let c = counter_clone.clone();
            async move {
                let count = c.fetch_add(1, Ordering::SeqCst);
                if count < 2 {
                    Err("transient error")
                } else {
                    Ok(42)
                }
            }
        },
        |_| true,
    )
    .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_retry_all_attempts_fail() {
    let config = RetryConfig::new()
        .with_max_retries(2)
        .with_initial_delay(Duration::from_millis(1));

    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result: Result<i32, RetryError<&str>> = retry_with_backoff(
        &config,
        || {
            let c = counter_clone.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<i32, &str>("persistent error")
            }
        },
        |_| true,
    )
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.attempts, 3);
    assert_eq!(err.last_error, "persistent error");
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_retry_non_retryable_error() {
    let config = RetryConfig::new()
        .with_max_retries(3)
        .with_initial_delay(Duration::from_millis(1));

    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result: Result<i32, RetryError<&str>> = retry_with_backoff(
        &config,
        || {
            let c = counter_clone.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<i32, &str>("bad request")
            }
        },
        |_| false,
    )
    .await;

    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_zero_retries_means_single_attempt() {
    let config = RetryConfig::new().with_max_retries(0);
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result: Result<(), RetryError<&str>> = retry_with_backoff(
        &config,
        || {
            let c = counter_clone.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err("connection reset")
            }
        },
        |_| true,
    )
    .await;

    assert_eq!(result.unwrap_err().attempts, 1);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}
