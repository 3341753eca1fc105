//! Attempt limiting for any back-off.

use std::time::Duration;

use super::BackOff;

/// A back-off capped at a fixed number of delays.
///
/// The limiter counts on its own and never asks the wrapped strategy whether it
/// may continue. This bounds unlimited strategies such as [`Constant`] and
/// re-caps limited ones to a smaller count.
///
/// [`Constant`]: super::Constant
///
/// # Examples
///
/// ```rust
/// use tinybackoff::{BackOff, Constant, Limited};
/// use std::time::Duration;
///
/// let mut backoff = Limited::new(Constant::new(Duration::from_secs(10)), 2);
///
/// assert_eq!(backoff.next_delay(), Duration::from_secs(10));
/// assert_eq!(backoff.next_delay(), Duration::from_secs(10));
/// assert!(!backoff.can_continue());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limited<B> {
    inner: B,
    attempt: u64,
    max_attempts: u64,
}

impl<B: BackOff> Limited<B> {
    /// Wrap `inner`, allowing at most `max_attempts` delays.
    pub fn new(inner: B, max_attempts: u64) -> Self {
        Self {
            inner,
            attempt: 0,
            max_attempts,
        }
    }
}

impl<B> Limited<B> {
    /// Number of delays handed out through this limiter.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Number of delays this limiter allows.
    pub fn max_attempts(&self) -> u64 {
        self.max_attempts
    }

    /// The wrapped back-off.
    pub fn get_ref(&self) -> &B {
        &self.inner
    }

    /// Unwrap the limiter, giving back the wrapped back-off.
    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: BackOff> BackOff for Limited<B> {
    fn can_continue(&self) -> bool {
        self.attempt < self.max_attempts
    }

    fn next_delay(&mut self) -> Duration {
        self.attempt = self.attempt.saturating_add(1);
        let delay = self.inner.next_delay();

        #[cfg(feature = "tracing")]
        tracing::trace!(
            attempt = self.attempt,
            max_attempts = self.max_attempts,
            ?delay,
            "limited back-off attempt"
        );

        delay
    }
}

/// Cap `backoff` at `max_attempts` delays.
///
/// Free-function form of [`BackOff::with_max_attempts`].
pub fn with_max_attempts<B: BackOff>(backoff: B, max_attempts: u64) -> Limited<B> {
    Limited::new(backoff, max_attempts)
}
