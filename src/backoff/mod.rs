//! Back-off strategies and the combinators that shape them.
//!
//! A back-off answers two questions for a retry loop: *may I try again?* and
//! *how long should I wait first?* Strategies here are pure state machines,
//! they never sleep and never touch the clock:
//!
//! - **Pure Core**: a strategy only counts attempts and does arithmetic
//! - **Composable**: cap any strategy with [`Limited`], chain several with [`Sequence`]
//! - **Caller-driven**: the retry loop, the sleeping and the cancellation belong to you
//!
//! # Quick Start
//!
//! ```rust
//! use tinybackoff::{BackOff, Linear};
//! use std::time::Duration;
//!
//! let mut backoff = Linear::new(Duration::from_millis(100), Duration::from_millis(50), 3);
//!
//! let mut waited = Vec::new();
//! while backoff.can_continue() {
//!     // run the operation, break on success...
//!     waited.push(backoff.next_delay());
//! }
//!
//! assert_eq!(
//!     waited,
//!     vec![
//!         Duration::from_millis(150),
//!         Duration::from_millis(200),
//!         Duration::from_millis(250),
//!     ]
//! );
//! ```
//!
//! # Strategies
//!
//! - **Constant**: the same delay every time, unlimited on its own
//! - **Linear**: `delay + multiplier * attempt`
//! - **Power**: `delay * base^attempt`
//! - **Exponential**: `max_delay / e^(attempts - attempt)`, ending exactly at `max_delay`
//!
//! Attempts are counted from 1 in every formula: the first delay already includes
//! one step of growth.
//!
//! # Arithmetic
//!
//! Delays are [`Duration`]s. Growth saturates at [`Duration::MAX`] rather than
//! wrapping, and no configuration is rejected: zero attempts simply means the
//! strategy is exhausted from the start.

mod limited;
mod sequence;
mod strategy;

use std::iter::FusedIterator;
use std::time::Duration;

pub use limited::{with_max_attempts, Limited};
pub use sequence::{combine, Sequence};
pub use strategy::{Constant, Exponential, Linear, Power};

/// A stateful policy producing the delay before each retry.
///
/// The protocol is: ask [`can_continue`](BackOff::can_continue), and only if it
/// says yes, take [`next_delay`](BackOff::next_delay). Asking is free; taking a
/// delay consumes one attempt. Once `can_continue` returns `false` it stays
/// `false` for the rest of the instance's life.
///
/// # Examples
///
/// ```rust
/// use tinybackoff::{BackOff, Constant};
/// use std::time::Duration;
///
/// let mut backoff = Constant::new(Duration::from_secs(1)).with_max_attempts(2);
///
/// assert!(backoff.can_continue());
/// assert_eq!(backoff.next_delay(), Duration::from_secs(1));
/// assert!(backoff.can_continue());
/// assert_eq!(backoff.next_delay(), Duration::from_secs(1));
/// assert!(!backoff.can_continue());
/// ```
pub trait BackOff {
    /// Whether another attempt is permitted. Never consumes an attempt.
    fn can_continue(&self) -> bool;

    /// Consume one attempt and return the delay to wait before it.
    fn next_delay(&mut self) -> Duration;

    /// Cap this back-off at `max_attempts` delays.
    ///
    /// The limiter keeps its own counter, so it can tighten a strategy that
    /// already has a limit, or bound one that has none.
    fn with_max_attempts(self, max_attempts: u64) -> Limited<Self>
    where
        Self: Sized,
    {
        Limited::new(self, max_attempts)
    }

    /// Turn this back-off into an iterator of delays.
    ///
    /// The iterator ends as soon as `can_continue` turns false.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tinybackoff::{BackOff, Power};
    /// use std::time::Duration;
    ///
    /// let delays: Vec<_> = Power::new(Duration::from_millis(10), 2, 3).delays().collect();
    ///
    /// assert_eq!(
    ///     delays,
    ///     vec![
    ///         Duration::from_millis(20),
    ///         Duration::from_millis(40),
    ///         Duration::from_millis(80),
    ///     ]
    /// );
    /// ```
    fn delays(self) -> Delays<Self>
    where
        Self: Sized,
    {
        Delays { backoff: self }
    }

    /// Erase the concrete type, e.g. to hand the back-off to [`combine`].
    fn boxed(self) -> Box<dyn BackOff + Send>
    where
        Self: Sized + Send + 'static,
    {
        Box::new(self)
    }
}

impl<B: BackOff + ?Sized> BackOff for Box<B> {
    fn can_continue(&self) -> bool {
        (**self).can_continue()
    }

    fn next_delay(&mut self) -> Duration {
        (**self).next_delay()
    }
}

impl<B: BackOff + ?Sized> BackOff for &mut B {
    fn can_continue(&self) -> bool {
        (**self).can_continue()
    }

    fn next_delay(&mut self) -> Duration {
        (**self).next_delay()
    }
}

/// Iterator over the delays of a back-off.
///
/// Created by [`BackOff::delays`].
#[derive(Debug, Clone)]
pub struct Delays<B> {
    backoff: B,
}

impl<B> Delays<B> {
    /// Give back the underlying back-off.
    pub fn into_inner(self) -> B {
        self.backoff
    }
}

impl<B: BackOff> Iterator for Delays<B> {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.backoff.can_continue() {
            Some(self.backoff.next_delay())
        } else {
            None
        }
    }
}

impl<B: BackOff> FusedIterator for Delays<B> {}
