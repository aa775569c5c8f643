//! Retry with exponential backoff for calls to the tax bracket API.
//!
//! Transport failures and retryable statuses (5xx and 429) are retried until
//! the policy's attempt limit is reached. Any other status ends the loop at
//! once. Backoff suspends only the calling task.

use std::future::Future;
use std::time::Duration;

use tax_core::BracketSourceError;
use tracing::{error, warn};

/// Outcome of a single attempt, as seen by the retry loop.
#[derive(Debug)]
pub(crate) enum Attempt<T> {
    Success(T),
    Status(u16),
    Transport(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero behaves like one.
    pub max_attempts: u32,
    /// Wait before the first retry; doubled for every retry after that.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-based).
    ///
    /// With the default policy attempt 1 waits 1s and attempt 2 waits 2s.
    pub fn backoff_delay(
        &self,
        attempt: u32,
    ) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    pub(crate) async fn run<T, F, Fut>(
        &self,
        operation: &'static str,
        mut attempt_fn: F,
    ) -> Result<T, BracketSourceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Attempt<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let failure = match attempt_fn().await {
                Attempt::Success(value) => return Ok(value),
                Attempt::Status(status) if !is_retryable_status(status) => {
                    warn!(operation, attempt, status, "non-retryable status");
                    return Err(BracketSourceError::UpstreamStatus {
                        status,
                        attempts: attempt,
                    });
                }
                Attempt::Status(status) => BracketSourceError::UpstreamStatus {
                    status,
                    attempts: attempt,
                },
                Attempt::Transport(cause) => BracketSourceError::Fetch {
                    cause,
                    attempts: attempt,
                },
            };

            if attempt >= max_attempts {
                error!(operation, attempts = attempt, error = %failure, "giving up");
                return Err(failure);
            }

            let delay = self.backoff_delay(attempt);
            warn!(operation, attempt, ?delay, error = %failure, "attempt failed, retrying");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// Server errors and rate limiting are worth another try.
pub fn is_retryable_status(status: u16) -> bool {
    status >= 500 || status == 429
}
