//! Retry policy with exponential backoff.
//!
//! Every call to the outage service runs under a [`RetryPolicy`]: transient
//! failures are retried with a doubling delay until the attempt ceiling is
//! reached, terminal failures surface immediately.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Retry policy for outage service calls.
///
/// Delay before retry `n` (0-indexed) is
/// `min(initial_backoff_ms * backoff_multiplier^n, max_backoff_ms)`.
/// With the defaults, a call that keeps failing sleeps 1s, 2s, 4s and 8s
/// between its five attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryPolicy {
    /// Maximum number of attempts (1 = no retry).
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds.
    pub initial_backoff_ms: u64,
    /// Multiplier applied to the delay after each retry.
    pub backoff_multiplier: f64,
    /// Ceiling on a single delay in milliseconds.
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 1_000,
            backoff_multiplier: 2.0,
            max_backoff_ms: 60_000,
        }
    }
}

impl RetryPolicy {
    /// Create a policy that never retries.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Create a fast policy for tests (1ms initial, 50ms ceiling).
    #[must_use]
    pub fn fast() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 1,
            backoff_multiplier: 2.0,
            max_backoff_ms: 50,
        }
    }

    /// Calculate the delay before retrying after a given attempt (0-indexed).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        // Allow precision loss for backoff calculation - acceptable for timing
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
        let delay = (self.initial_backoff_ms as f64) * self.backoff_multiplier.powi(attempt as i32);
        // Truncation is intentional - we want milliseconds as integer
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let delay_ms = delay as u64;
        Duration::from_millis(delay_ms.min(self.max_backoff_ms))
    }
}

/// Run `op` under the retry policy.
///
/// Each failed attempt is logged with its backoff. Terminal (non-retriable)
/// failures and exhaustion of the attempt ceiling both return the last error
/// to the caller; nothing is raised past this boundary.
///
/// # Errors
/// Returns the last [`ApiError`] once the policy gives up.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, operation: &str, mut op: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::debug!(operation, attempt, "call succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if !err.is_retriable() => {
                tracing::error!(operation, error = %err, "call failed with terminal error");
                return Err(err);
            }
            Err(err) => {
                attempt += 1;
                if attempt >= policy.max_attempts {
                    tracing::error!(
                        operation,
                        attempts = attempt,
                        error = %err,
                        "retries exhausted"
                    );
                    return Err(err);
                }

                let backoff = policy.delay_for_attempt(attempt - 1);
                tracing::warn!(
                    operation,
                    attempt,
                    max_attempts = policy.max_attempts,
                    backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "call failed; backing off"
                );
                tokio::time::sleep(backoff).await;
            }
        }
    }
}
