//! Retry, exponential backoff and per-endpoint rate limiting around a fetch.
//!
//! ```text
//! attempt 0 ── fail ── wait base ──────── attempt 1 ── fail ── wait base*2 ── attempt 2 ...
//!     ^                                       ^
//!     └─ rate-limit permit per endpoint ──────┘
//! ```
//!
//! A fetch is tried at most `max_retries + 1` times. Network, timeout, HTTP
//! and parse failures are all retried; a [`SourceError::Configuration`] is
//! returned on the spot.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use tennis_odds_core::AcquisitionConfig;
use tracing::{debug, error, info, warn};

use crate::error::{AcquisitionError, SourceError};

/// Endpoint key used by [`acquire`].
pub const DEFAULT_ENDPOINT: &str = "default";

/// Default cap on a single backoff wait.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

// =============================================================================
// Acquisition Policy
// =============================================================================

/// Retry and rate-limit policy shared by every source in a cycle.
///
/// Cloning is cheap and clones share the same rate limiter state, so one
/// endpoint is spaced out no matter which clone calls it.
#[derive(Clone)]
pub struct AcquisitionPolicy {
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
    rate_limit: Duration,
    limiter: Option<Arc<DefaultKeyedRateLimiter<String>>>,
}

impl std::fmt::Debug for AcquisitionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcquisitionPolicy")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .field("rate_limit", &self.rate_limit)
            .finish_non_exhaustive()
    }
}

impl AcquisitionPolicy {
    /// Creates a policy. Non-positive or non-finite durations count as zero;
    /// a zero rate limit disables spacing.
    #[must_use]
    pub fn new(max_retries: u32, base_delay_seconds: f64, rate_limit_seconds: f64) -> Self {
        let rate_limit = seconds(rate_limit_seconds);
        let limiter = Quota::with_period(rate_limit)
            .map(|quota| Arc::new(RateLimiter::keyed(quota.allow_burst(nonzero!(1u32)))));

        Self {
            max_retries,
            base_delay: seconds(base_delay_seconds),
            max_delay: DEFAULT_MAX_DELAY,
            rate_limit,
            limiter,
        }
    }

    /// Creates a policy from application configuration.
    #[must_use]
    pub fn from_config(config: &AcquisitionConfig) -> Self {
        Self::new(
            config.max_retries,
            config.base_delay_seconds,
            config.rate_limit_seconds,
        )
        .with_max_delay(seconds(config.max_delay_seconds))
    }

    /// No retries and no spacing.
    #[must_use]
    pub fn no_retry() -> Self {
        Self::new(0, 0.0, 0.0)
    }

    /// Sets the cap on a single backoff wait.
    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Retries allowed after the first attempt.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Minimum spacing between calls to one endpoint.
    #[must_use]
    pub fn rate_limit(&self) -> Duration {
        self.rate_limit
    }

    /// Wait after failed attempt `attempt` (0-based): `base * 2^attempt`,
    /// capped at the maximum delay.
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Backoff for a failed attempt, stretched to honour a source's own
    /// retry-after hint.
    fn retry_delay(&self, attempt: u32, err: &SourceError) -> Duration {
        let backoff = self.backoff_delay(attempt);
        match err.retry_after_secs() {
            Some(secs) => backoff.max(Duration::from_secs(secs)).min(self.max_delay),
            None => backoff,
        }
    }

    /// Waits until `endpoint` may be called again.
    pub async fn wait_for_permit(&self, endpoint: &str) {
        if let Some(limiter) = &self.limiter {
            limiter.until_key_ready(&endpoint.to_string()).await;
        }
    }

    /// Runs `fetch` under this policy.
    ///
    /// Every attempt, first or retry, first waits for the endpoint's
    /// rate-limit permit.
    ///
    /// # Errors
    /// Returns [`AcquisitionError`] with the attempt count and the last error
    /// once retries are exhausted or a non-retryable error occurs.
    pub async fn run<T, F, Fut>(&self, endpoint: &str, mut fetch: F) -> Result<T, AcquisitionError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        let mut attempt: u32 = 0;

        loop {
            self.wait_for_permit(endpoint).await;
            debug!(endpoint, attempt = attempt + 1, "Fetching");

            match fetch().await {
                Ok(value) => {
                    if attempt > 0 {
                        info!(endpoint, attempts = attempt + 1, "Fetch recovered after retry");
                    }
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = self.retry_delay(attempt, &e);
                    warn!(
                        endpoint,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        error = %e,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    let attempts = attempt + 1;
                    error!(
                        endpoint,
                        attempts,
                        retryable = e.is_retryable(),
                        error = %e,
                        "Fetch failed, giving up"
                    );
                    return Err(AcquisitionError {
                        endpoint: endpoint.to_string(),
                        attempts,
                        source: e,
                    });
                }
            }
        }
    }
}

impl Default for AcquisitionPolicy {
    fn default() -> Self {
        Self::from_config(&AcquisitionConfig::default())
    }
}

/// Runs `fetch` with retry, backoff and rate limiting.
///
/// The rate limiter is private to this call: attempts within the call are
/// spaced, but two `acquire` calls are not spaced from each other. To space
/// repeated fetches of the same target, build one [`AcquisitionPolicy`] and
/// call [`AcquisitionPolicy::run`] on it for every fetch.
///
/// # Errors
/// See [`AcquisitionPolicy::run`].
pub async fn acquire<T, F, Fut>(
    fetch: F,
    max_retries: u32,
    base_delay_seconds: f64,
    rate_limit_seconds: f64,
) -> Result<T, AcquisitionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    AcquisitionPolicy::new(max_retries, base_delay_seconds, rate_limit_seconds)
        .run(DEFAULT_ENDPOINT, fetch)
        .await
}

fn seconds(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::try_from_secs_f64(value).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn network_error() -> SourceError {
        SourceError::Network("connection reset".to_string())
    }

    // ==================== Policy Tests ====================

    #[test]
    fn test_backoff_doubles() {
        let policy = AcquisitionPolicy::new(5, 1.0, 0.0);
        assert_eq!(policy.backoff_delay(0), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_capped() {
        let policy = AcquisitionPolicy::new(50, 1.0, 0.0).with_max_delay(Duration::from_secs(10));
        assert_eq!(policy.backoff_delay(4), Duration::from_secs(10));
        assert_eq!(policy.backoff_delay(40), Duration::from_secs(10));
    }

    #[test]
    fn test_retry_after_stretches_delay() {
        let policy = AcquisitionPolicy::new(3, 1.0, 0.0);
        let delay = policy.retry_delay(0, &SourceError::rate_limited(Some(5)));
        assert_eq!(delay, Duration::from_secs(5));
    }

    #[test]
    fn test_from_config() {
        let policy = AcquisitionPolicy::from_config(&AcquisitionConfig::default());
        assert_eq!(policy.max_retries(), 3);
        assert_eq!(policy.rate_limit(), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(10), Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_durations_are_zero() {
        let policy = AcquisitionPolicy::new(1, -1.0, f64::NAN);
        assert_eq!(policy.backoff_delay(0), Duration::ZERO);
        assert_eq!(policy.rate_limit(), Duration::ZERO);
    }

    // ==================== Retry Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_fails_twice_then_succeeds() {
        let calls = AtomicU32::new(0);

        let result = acquire(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err(network_error())
                    } else {
                        Ok(n)
                    }
                }
            },
            3,
            1.0,
            0.0,
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries() {
        let calls = AtomicU32::new(0);

        let err = acquire(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(SourceError::Timeout("slow".to_string())) }
            },
            2,
            1.0,
            0.0,
        )
        .await
        .unwrap_err();

        assert_eq!(err.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(err.source, SourceError::Timeout(_)));
        assert_eq!(err.endpoint, DEFAULT_ENDPOINT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_single_attempt() {
        let calls = AtomicU32::new(0);

        let err = acquire(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(network_error()) }
            },
            0,
            1.0,
            0.0,
        )
        .await
        .unwrap_err();

        assert_eq!(err.attempts, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_timing() {
        let start = Instant::now();

        let result = acquire(
            {
                let mut n = 0;
                move || {
                    n += 1;
                    let current = n;
                    async move {
                        if current < 3 {
                            Err(network_error())
                        } else {
                            Ok(())
                        }
                    }
                }
            },
            3,
            1.0,
            0.0,
        )
        .await;

        assert!(result.is_ok());
        // 1s after the first failure, 2s after the second.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(4), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_configuration_error_fails_fast() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let err = acquire(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(SourceError::Configuration("no api key".to_string())) }
            },
            5,
            1.0,
            0.0,
        )
        .await
        .unwrap_err();

        assert_eq!(err.attempts, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(start.elapsed() < Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_error_retried() {
        let calls = AtomicU32::new(0);

        let err = acquire(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(SourceError::api(404, "unknown sport")) }
            },
            2,
            1.0,
            0.0,
        )
        .await
        .unwrap_err();

        assert_eq!(err.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(
            err.source,
            SourceError::Api {
                status_code: 404,
                ..
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_parse_error_retried() {
        let calls = AtomicU32::new(0);

        let err = acquire(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(SourceError::Parse("truncated body".to_string())) }
            },
            2,
            1.0,
            0.0,
        )
        .await
        .unwrap_err();

        assert_eq!(err.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    // ==================== Rate Limit Tests ====================

    #[tokio::test]
    async fn test_rate_limit_spaces_same_endpoint() {
        let policy = AcquisitionPolicy::new(0, 0.0, 0.2);
        let start = std::time::Instant::now();

        for _ in 0..3 {
            policy
                .run("https://odds.example/tennis", || async { Ok::<_, SourceError>(()) })
                .await
                .unwrap();
        }

        // First call is immediate, the next two wait one period each.
        assert!(start.elapsed() >= Duration::from_millis(350));
    }

    #[tokio::test]
    async fn test_rate_limit_spaces_retries() {
        let calls = AtomicU32::new(0);
        let start = std::time::Instant::now();

        let result = acquire(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err(network_error())
                    } else {
                        Ok(n)
                    }
                }
            },
            3,
            0.0,
            0.3,
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        // No backoff, so only the permit spaces the three attempts: 2 x 300ms.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(550), "{elapsed:?}");
    }

    #[tokio::test]
    async fn test_rate_limit_keyed_per_endpoint() {
        let policy = AcquisitionPolicy::new(0, 0.0, 5.0);
        let start = std::time::Instant::now();

        for endpoint in ["a", "b", "c"] {
            policy
                .run(endpoint, || async { Ok::<_, SourceError>(()) })
                .await
                .unwrap();
        }

        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_rate_limit_shared_between_clones() {
        let policy = AcquisitionPolicy::new(0, 0.0, 0.2);
        let clone = policy.clone();
        let start = std::time::Instant::now();

        policy.wait_for_permit("shared").await;
        clone.wait_for_permit("shared").await;

        assert!(start.elapsed() >= Duration::from_millis(150));
    }
}
