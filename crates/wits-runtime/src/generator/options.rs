//! Tuning knobs for the background generator.

use std::time::Duration;

/// Configuration for [`BackgroundGenerator`](super::BackgroundGenerator).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use wits_runtime::GeneratorOptions;
///
/// let options = GeneratorOptions::new()
///     .with_lookahead_depth(2)
///     .with_shutdown_timeout(Duration::from_secs(1));
/// assert_eq!(options.lookahead_depth(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    lookahead_depth: usize,
    poll_interval: Duration,
    error_backoff: Duration,
    shutdown_timeout: Duration,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            lookahead_depth: 3,
            poll_interval: Duration::from_millis(100),
            error_backoff: Duration::from_secs(1),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

impl GeneratorOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of generated-but-unpresented turns.
    ///
    /// Defaults to 3. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_lookahead_depth(mut self, depth: usize) -> Self {
        self.lookahead_depth = depth.max(1);
        self
    }

    /// How long the worker waits before re-checking a full buffer.
    ///
    /// Defaults to 100ms. Also bounds how quickly the worker notices
    /// cancellation while idle.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Delay after an unexpected failure before the worker retries.
    ///
    /// Defaults to 1 second.
    #[must_use]
    pub const fn with_error_backoff(mut self, backoff: Duration) -> Self {
        self.error_backoff = backoff;
        self
    }

    /// How long `stop` waits for the worker to exit.
    ///
    /// Defaults to 5 seconds.
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    pub const fn lookahead_depth(&self) -> usize {
        self.lookahead_depth
    }

    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub const fn error_backoff(&self) -> Duration {
        self.error_backoff
    }

    pub const fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }
}
