//! Request pacing and rate-limit retries for the forge API.
//!
//! [`RateLimiter`] spaces consecutive requests by a fixed interval and
//! [`RetryPolicy`] decides how long to back off after a rate-limit response.
//! Both run on the tokio clock, so tests can drive them with a paused runtime.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Default spacing between consecutive requests.
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(100);

/// Enforces a minimum interval between consecutive requests.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter that spaces requests `interval` apart.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    /// Creates a limiter that never waits.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Returns the configured interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until the next request may be sent, then claims the slot.
    ///
    /// Returns the time spent waiting.
    pub async fn acquire(&self) -> Duration {
        let mut last_request = self.last_request.lock().await;
        let now = Instant::now();

        let waited = match *last_request {
            Some(previous) => {
                let ready_at = previous + self.interval;
                if ready_at > now {
                    tokio::time::sleep_until(ready_at).await;
                    ready_at - now
                } else {
                    Duration::ZERO
                }
            }
            None => Duration::ZERO,
        };

        *last_request = Some(Instant::now());
        waited
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_INTERVAL)
    }
}

/// Bounded exponential backoff for rate-limited requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; zero aborts on the first rate limit.
    pub max_retries: u32,
    /// Wait before the first retry.
    pub initial_backoff: Duration,
    /// Ceiling for any single wait.
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Returns the wait before retry number `attempt` (0-based), or `None`
    /// once retries are exhausted.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_retries {
            return None;
        }

        let factor = 2u32.saturating_pow(attempt);
        let ceiling = self.max_backoff.min(Duration::from_secs(MAX_WAIT_SECS));
        Some(self.initial_backoff.saturating_mul(factor).min(ceiling))
    }

    /// Sleeps before retry number `attempt`, returning false when the policy
    /// is exhausted and the caller should give up.
    pub async fn wait(&self, attempt: u32) -> bool {
        match self.backoff(attempt) {
            Some(delay) => {
                info!(
                    attempt = attempt + 1,
                    max_retries = self.max_retries,
                    wait_ms = delay.as_millis() as u64,
                    "Rate limited, backing off"
                );
                tokio::time::sleep(delay).await;
                true
            }
            None => {
                if self.max_retries > 0 {
                    warn!(max_retries = self.max_retries, "Rate limit retries exhausted");
                } else {
                    debug!("Rate limited and retries are disabled");
                }
                false
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(60),
        }
    }
}
