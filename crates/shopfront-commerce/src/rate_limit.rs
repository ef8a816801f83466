//! Retry policy for commerce API reads.
//!
//! Rate limits (429), network failures and 5xx responses are retried; a 404,
//! a 4xx rejection or an unparseable body will not change on retry and is
//! returned immediately. A 429 waits at least as long as the API's
//! `Retry-After` asks for.

use std::future::Future;
use std::time::Duration;

use crate::error::CommerceError;

/// How many extra attempts a commerce read gets, and how long it waits
/// between them.
///
/// The wait before retry `n` (0-based) is `backoff_base_secs * 2^n`. For a
/// 429 it is raised to the response's `Retry-After` when that is longer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    max_retries: u32,
    backoff_base_secs: u64,
}

impl RetryPolicy {
    #[must_use]
    pub(crate) fn new(max_retries: u32, backoff_base_secs: u64) -> Self {
        Self {
            max_retries,
            backoff_base_secs,
        }
    }

    /// The wait before the next attempt, or `None` when `err` should be
    /// returned to the caller.
    pub(crate) fn delay_before_retry(&self, attempt: u32, err: &CommerceError) -> Option<Duration> {
        if attempt >= self.max_retries {
            return None;
        }

        let backoff_secs = self.backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        let secs = match err {
            CommerceError::RateLimited {
                retry_after_secs, ..
            } => backoff_secs.max(*retry_after_secs),
            CommerceError::Http(_) => backoff_secs,
            CommerceError::UnexpectedStatus { status, .. } if *status >= 500 => backoff_secs,
            _ => return None,
        };
        Some(Duration::from_secs(secs))
    }

    /// Runs `operation` until it succeeds, fails with a non-retriable error,
    /// or the retry budget is spent. The last error is returned.
    pub(crate) async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, CommerceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CommerceError>>,
    {
        let mut attempt = 0u32;
        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            let Some(delay) = self.delay_before_retry(attempt, &err) else {
                return Err(err);
            };

            tracing::warn!(
                attempt = attempt + 1,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "commerce API read failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
