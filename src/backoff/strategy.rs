//! The primitive delay strategies.

use std::time::Duration;

use super::BackOff;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// The same delay on every attempt.
///
/// A constant back-off never runs out by itself; cap it with
/// [`BackOff::with_max_attempts`].
///
/// # Examples
///
/// ```rust
/// use tinybackoff::{BackOff, Constant};
/// use std::time::Duration;
///
/// let mut backoff = Constant::new(Duration::from_millis(500));
///
/// assert!(backoff.can_continue());
/// assert_eq!(backoff.next_delay(), Duration::from_millis(500));
/// assert_eq!(backoff.next_delay(), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant {
    delay: Duration,
}

impl Constant {
    /// Create a back-off that always waits `delay`.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl BackOff for Constant {
    fn can_continue(&self) -> bool {
        true
    }

    fn next_delay(&mut self) -> Duration {
        self.delay
    }
}

/// Delay growing by a fixed step per attempt.
///
/// Delay = delay + multiplier * attempt, with attempt starting at 1.
///
/// # Examples
///
/// ```rust
/// use tinybackoff::{BackOff, Linear};
/// use std::time::Duration;
///
/// let mut backoff = Linear::new(Duration::from_secs(60), Duration::from_secs(30), 2);
///
/// // The first delay already includes one step.
/// assert_eq!(backoff.next_delay(), Duration::from_secs(90));
/// assert_eq!(backoff.next_delay(), Duration::from_secs(120));
/// assert!(!backoff.can_continue());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Linear {
    attempt: u64,

    delay: Duration,
    multiplier: Duration,
    max_attempts: u64,
}

impl Linear {
    /// Create a linear back-off allowing `max_attempts` delays.
    pub fn new(delay: Duration, multiplier: Duration, max_attempts: u64) -> Self {
        Self {
            attempt: 0,

            delay,
            multiplier,
            max_attempts,
        }
    }

    /// Number of delays handed out so far.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Number of delays this back-off allows.
    pub fn max_attempts(&self) -> u64 {
        self.max_attempts
    }
}

impl BackOff for Linear {
    fn can_continue(&self) -> bool {
        self.attempt < self.max_attempts
    }

    fn next_delay(&mut self) -> Duration {
        self.attempt = self.attempt.saturating_add(1);
        self.delay.saturating_add(saturating_scale(self.multiplier, self.attempt))
    }
}

/// Delay multiplied by a power of an integer base.
///
/// Delay = delay * base^attempt, with attempt starting at 1.
///
/// # Examples
///
/// ```rust
/// use tinybackoff::{BackOff, Power};
/// use std::time::Duration;
///
/// let mut backoff = Power::new(Duration::from_millis(100), 2, 3);
///
/// assert_eq!(backoff.next_delay(), Duration::from_millis(200));
/// assert_eq!(backoff.next_delay(), Duration::from_millis(400));
/// assert_eq!(backoff.next_delay(), Duration::from_millis(800));
/// assert!(!backoff.can_continue());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Power {
    attempt: u64,

    delay: Duration,
    base: u64,
    max_attempts: u64,
}

impl Power {
    /// Create a power back-off allowing `max_attempts` delays.
    pub fn new(delay: Duration, base: u64, max_attempts: u64) -> Self {
        Self {
            attempt: 0,

            delay,
            base,
            max_attempts,
        }
    }

    /// Number of delays handed out so far.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Number of delays this back-off allows.
    pub fn max_attempts(&self) -> u64 {
        self.max_attempts
    }
}

impl BackOff for Power {
    fn can_continue(&self) -> bool {
        self.attempt < self.max_attempts
    }

    fn next_delay(&mut self) -> Duration {
        self.attempt = self.attempt.saturating_add(1);
        let factor = u32::try_from(self.attempt)
            .ok()
            .and_then(|exp| self.base.checked_pow(exp));

        match factor {
            Some(factor) => saturating_scale(self.delay, factor),
            None if self.delay.is_zero() => Duration::ZERO,
            None => Duration::MAX,
        }
    }
}

/// Delay approaching `max_delay` exponentially, reaching it on the last attempt.
///
/// Delay = max_delay / e^(max_attempts - attempt), with attempt starting at 1.
/// Since the curve is anchored at the final attempt, the total number of
/// attempts has to be known up front, which also makes this strategy
/// self-limiting.
///
/// # Examples
///
/// ```rust
/// use tinybackoff::{BackOff, Exponential};
/// use std::time::Duration;
///
/// let max = Duration::from_secs(60);
/// let delays: Vec<_> = Exponential::new(max, 3).delays().collect();
///
/// assert!(delays[0] < delays[1]);
/// assert!(delays[1] < delays[2]);
/// assert_eq!(delays[2], max);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exponential {
    attempt: u64,

    max_delay: Duration,
    max_attempts: u64,
}

impl Exponential {
    /// Create an exponential back-off of `max_attempts` delays ending at `max_delay`.
    pub fn new(max_delay: Duration, max_attempts: u64) -> Self {
        Self {
            attempt: 0,

            max_delay,
            max_attempts,
        }
    }

    /// Number of delays handed out so far.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Number of delays this back-off allows.
    pub fn max_attempts(&self) -> u64 {
        self.max_attempts
    }
}

impl BackOff for Exponential {
    fn can_continue(&self) -> bool {
        self.attempt < self.max_attempts
    }

    fn next_delay(&mut self) -> Duration {
        self.attempt = self.attempt.saturating_add(1);
        // Past the last attempt the exponent stays at 0.
        let remaining = self.max_attempts.saturating_sub(self.attempt);
        if remaining == 0 {
            return self.max_delay;
        }

        let nanos = self.max_delay.as_nanos() as f64 / (remaining as f64).exp();
        Duration::from_nanos(nanos as u64)
    }
}

/// `delay * factor`, clamped to `Duration::MAX`.
fn saturating_scale(delay: Duration, factor: u64) -> Duration {
    delay
        .as_nanos()
        .checked_mul(u128::from(factor))
        .and_then(from_nanos_u128)
        .unwrap_or(Duration::MAX)
}

fn from_nanos_u128(nanos: u128) -> Option<Duration> {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
    Some(Duration::new(secs, (nanos % NANOS_PER_SEC) as u32))
}
