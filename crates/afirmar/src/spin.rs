//! Spin-wait executor: deadline-bounded retry of a check closure.
//!
//! Every assertion operation funnels through [`spin`]; no operation loops on
//! its own. A check either yields a value or fails with an expectation-class
//! [`AssertError`]; the executor reruns failing checks until the deadline,
//! then surfaces the last failure unchanged.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::result::AssertResult;

/// Default assertion timeout (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval between attempts (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Deadline and polling cadence for a spin-wait run.
///
/// A zero timeout means "single attempt, no retry".
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpinConfig {
    /// Total deadline for the check to succeed
    pub timeout: Duration,
    /// Sleep between attempts
    pub poll_interval: Duration,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl SpinConfig {
    /// Create a config with the given timeout and the default poll interval
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Set the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the poll interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Config that runs the check exactly once
    #[must_use]
    pub const fn single_attempt() -> Self {
        Self {
            timeout: Duration::ZERO,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// Run `check` until it succeeds or the deadline elapses.
///
/// A successful attempt returns immediately without sleeping. A failed
/// attempt is retried after `poll_interval` for as long as the elapsed time
/// stays under `timeout`; once the deadline is reached the failure from the
/// last attempt propagates as-is. Failures outside the expectation taxonomy
/// (caller misuse) propagate on first sight.
///
/// # Errors
///
/// Returns the last [`crate::AssertError`] observed before the deadline.
pub fn spin<T, F>(mut check: F, config: SpinConfig) -> AssertResult<T>
where
    F: FnMut() -> AssertResult<T>,
{
    if config.timeout.is_zero() {
        return check();
    }

    let start = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        match check() {
            Ok(value) => return Ok(value),
            Err(e) if e.is_expectation() => {
                if start.elapsed() >= config.timeout {
                    tracing::trace!(attempts, message = e.message(), "assertion deadline elapsed");
                    return Err(e);
                }
                tracing::trace!(attempts, message = e.message(), "assertion check failed; retrying");
            }
            Err(e) => return Err(e),
        }
        std::thread::sleep(config.poll_interval);
    }
}
