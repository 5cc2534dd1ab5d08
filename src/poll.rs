//! Polling for eventually consistent writes.
//!
//! After a save, the backing service may take a few seconds before a read
//! reflects it. [`poll`] repeats a request until a validator accepts the
//! response, waiting a little longer after each miss.

use std::fmt::Display;
use std::time::Duration;

use tracing::debug;

use crate::error::PollError;

/// Timing for [`poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Total time allowed for waiting between requests.
    pub timeout: Duration,
    /// Base delay; the wait before attempt `n + 1` is `n` times this.
    pub time_between_requests: Duration,
    /// Most requests made before giving up, whatever the delays add up to.
    pub max_attempts: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            time_between_requests: Duration::from_secs(3),
            max_attempts: 10,
        }
    }
}

impl PollOptions {
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_time_between_requests(mut self, delay: Duration) -> Self {
        self.time_between_requests = delay;
        self
    }

    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Repeats `request` until `validate` accepts its response.
///
/// Blocks the calling thread between attempts.
///
/// # Errors
///
/// Returns [`PollError::Request`] as soon as a request fails and
/// [`PollError::Timeout`] when `options.max_attempts` requests were made or
/// the next wait would push the total past `options.timeout`.
pub fn poll<T, E, R, V>(request: R, validate: V, options: &PollOptions) -> Result<T, PollError>
where
    R: FnMut() -> Result<T, E>,
    E: Display,
    V: Fn(&T) -> bool,
{
    poll_with(request, validate, options, std::thread::sleep)
}

/// [`poll`] with a caller-supplied `sleep`.
///
/// # Errors
///
/// Same as [`poll`].
pub fn poll_with<T, E, R, V, S>(
    mut request: R,
    validate: V,
    options: &PollOptions,
    mut sleep: S,
) -> Result<T, PollError>
where
    R: FnMut() -> Result<T, E>,
    E: Display,
    V: Fn(&T) -> bool,
    S: FnMut(Duration),
{
    let mut attempts: u32 = 0;
    let mut waited = Duration::ZERO;
    loop {
        attempts += 1;
        let response = request().map_err(|e| PollError::Request {
            message: e.to_string(),
        })?;
        if validate(&response) {
            return Ok(response);
        }

        let delay = options.time_between_requests.saturating_mul(attempts);
        if attempts >= options.max_attempts || waited.saturating_add(delay) > options.timeout {
            return Err(PollError::Timeout {
                attempts,
                waited_ms: millis(waited),
            });
        }
        debug!(attempts, delay_ms = millis(delay), "poll response not ready, waiting");
        sleep(delay);
        waited += delay;
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
