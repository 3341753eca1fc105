//! Chaining several back-offs into one.

use std::fmt;
use std::time::Duration;

use super::BackOff;

/// Several back-offs used one after another, optionally preceded by a fixed delay.
///
/// Each step is used until it reports it cannot continue, then the sequence moves
/// on to the next one and never looks back. A step that is exhausted from the
/// start is skipped without producing a delay.
///
/// Steps should carry their own limit (see [`BackOff::with_max_attempts`]); an
/// unlimited step keeps the sequence on it forever.
///
/// # Examples
///
/// ```rust
/// use tinybackoff::{BackOff, Constant, Linear, Sequence};
/// use std::time::Duration;
///
/// let backoff = Sequence::new()
///     .with_first_delay(Duration::from_secs(1))
///     .then(Constant::new(Duration::from_secs(10)).with_max_attempts(2))
///     .then(Linear::new(Duration::from_secs(60), Duration::from_secs(30), 2));
///
/// let delays: Vec<_> = backoff.delays().map(|d| d.as_secs()).collect();
/// assert_eq!(delays, vec![1, 10, 10, 90, 120]);
/// ```
#[derive(Default)]
pub struct Sequence {
    first_delay: Option<Duration>,
    steps: Vec<Box<dyn BackOff + Send>>,
    current: usize,
}

impl Sequence {
    /// An empty sequence: no first delay, no steps, exhausted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `delay` verbatim on the first call, before any step is consulted.
    ///
    /// `Duration::ZERO` is a real first delay here, not "no first delay".
    pub fn with_first_delay(mut self, delay: Duration) -> Self {
        self.first_delay = Some(delay);
        self
    }

    /// Append a step to the end of the sequence.
    pub fn then<B>(mut self, step: B) -> Self
    where
        B: BackOff + Send + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Append an already boxed step.
    pub fn push(&mut self, step: Box<dyn BackOff + Send>) {
        self.steps.push(step);
    }

    /// Number of steps, consumed or not.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the sequence has no steps at all.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the first delay is still waiting to be handed out.
    pub fn first_delay_pending(&self) -> bool {
        self.first_delay.is_some()
    }
}

impl BackOff for Sequence {
    fn can_continue(&self) -> bool {
        self.first_delay.is_some()
            || self.steps[self.current..]
                .iter()
                .any(|step| step.can_continue())
    }

    fn next_delay(&mut self) -> Duration {
        if let Some(delay) = self.first_delay.take() {
            #[cfg(feature = "tracing")]
            tracing::trace!(?delay, "sequence first delay");
            return delay;
        }

        while let Some(step) = self.steps.get_mut(self.current) {
            if step.can_continue() {
                let delay = step.next_delay();

                #[cfg(feature = "tracing")]
                tracing::trace!(step = self.current, ?delay, "sequence delay");

                return delay;
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(step = self.current, "sequence step exhausted, advancing");

            self.current += 1;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("next_delay called on an exhausted sequence");

        Duration::ZERO
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("first_delay", &self.first_delay)
            .field("steps", &self.steps.len())
            .field("current", &self.current)
            .finish()
    }
}

/// Chain `steps` behind an optional first delay.
///
/// # Examples
///
/// ```rust
/// use tinybackoff::{combine, BackOff, Constant};
/// use std::time::Duration;
///
/// let mut backoff = combine(
///     None,
///     vec![Constant::new(Duration::from_secs(5)).with_max_attempts(1).boxed()],
/// );
///
/// assert_eq!(backoff.next_delay(), Duration::from_secs(5));
/// assert!(!backoff.can_continue());
/// ```
pub fn combine<I>(first_delay: Option<Duration>, steps: I) -> Sequence
where
    I: IntoIterator<Item = Box<dyn BackOff + Send>>,
{
    Sequence {
        first_delay,
        steps: steps.into_iter().collect(),
        current: 0,
    }
}
