//! Testing utilities for code that builds or consumes back-offs.
//!
//! # Examples
//!
//! ## Draining a back-off
//!
//! ```rust
//! use tinybackoff::testing::drain;
//! use tinybackoff::{BackOff, Constant};
//! use std::time::Duration;
//!
//! let delays = drain(Constant::new(Duration::from_secs(1)).with_max_attempts(2));
//! assert_eq!(delays, vec![Duration::from_secs(1); 2]);
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use tinybackoff::{assert_delays, assert_exhausted};
//! use tinybackoff::{BackOff, Linear, Sequence};
//! use std::time::Duration;
//!
//! assert_delays!(
//!     Linear::new(Duration::ZERO, Duration::from_secs(1), 2),
//!     [Duration::from_secs(1), Duration::from_secs(2)]
//! );
//! assert_exhausted!(Sequence::new());
//! ```

use std::time::Duration;

use crate::backoff::BackOff;

/// Upper bound on how many delays [`drain`] will take before giving up.
pub const DRAIN_LIMIT: usize = 10_000;

/// Collect every delay a back-off hands out, following the
/// `can_continue`/`next_delay` protocol.
///
/// # Panics
///
/// Panics if the back-off is still willing to continue after [`DRAIN_LIMIT`]
/// delays, which almost always means an unlimited strategy slipped in.
pub fn drain<B: BackOff>(mut backoff: B) -> Vec<Duration> {
    let mut delays = Vec::new();
    while backoff.can_continue() {
        if delays.len() == DRAIN_LIMIT {
            panic!("back-off did not exhaust within {} delays", DRAIN_LIMIT);
        }
        delays.push(backoff.next_delay());
    }
    delays
}

/// Assert that a back-off yields exactly the given delays, then stops.
///
/// # Example
///
/// ```rust
/// use tinybackoff::{assert_delays, BackOff, Constant};
/// use std::time::Duration;
///
/// assert_delays!(
///     Constant::new(Duration::from_millis(10)).with_max_attempts(2),
///     [Duration::from_millis(10), Duration::from_millis(10)]
/// );
/// ```
#[macro_export]
macro_rules! assert_delays {
    ($backoff:expr, [$($delay:expr),* $(,)?]) => {{
        let actual = $crate::testing::drain($backoff);
        let expected: ::std::vec::Vec<::std::time::Duration> = ::std::vec![$($delay),*];
        assert_eq!(actual, expected, "back-off produced unexpected delays");
    }};
}

/// Assert that a back-off refuses to continue.
///
/// # Example
///
/// ```rust
/// use tinybackoff::{assert_exhausted, BackOff, Constant};
/// use std::time::Duration;
///
/// assert_exhausted!(Constant::new(Duration::from_secs(1)).with_max_attempts(0));
/// ```
#[macro_export]
macro_rules! assert_exhausted {
    ($backoff:expr) => {
        if $crate::BackOff::can_continue(&$backoff) {
            panic!("Expected exhausted back-off, but it can continue");
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
use crate::config::BackOffConfig;

#[cfg(feature = "proptest")]
fn arb_delay() -> impl Strategy<Value = Duration> + Clone {
    (0u64..10_000).prop_map(Duration::from_millis)
}

/// Arbitrary back-off configs. Every generated config is bounded, so
/// [`drain`] always terminates on it.
#[cfg(feature = "proptest")]
impl Arbitrary for BackOffConfig {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let attempts = 0u64..16;
        let leaf = prop_oneof![
            (arb_delay(), attempts.clone())
                .prop_map(|(delay, max_attempts)| BackOffConfig::constant(delay, max_attempts)),
            (arb_delay(), arb_delay(), attempts.clone()).prop_map(
                |(delay, multiplier, attempts)| BackOffConfig::Linear {
                    delay,
                    multiplier,
                    attempts,
                }
            ),
            (arb_delay(), 0u64..5, attempts.clone()).prop_map(|(delay, base, attempts)| {
                BackOffConfig::Power {
                    delay,
                    base,
                    attempts,
                }
            }),
            (arb_delay(), attempts).prop_map(|(max_delay, attempts)| {
                BackOffConfig::Exponential {
                    max_delay,
                    attempts,
                }
            }),
        ];

        leaf.prop_recursive(3, 16, 4, |inner| {
            prop_oneof![
                (0u64..16, inner.clone()).prop_map(|(max_attempts, backoff)| {
                    BackOffConfig::Limited {
                        max_attempts,
                        backoff: Box::new(backoff),
                    }
                }),
                (
                    proptest::option::of(arb_delay()),
                    proptest::collection::vec(inner, 0..4)
                )
                    .prop_map(|(first_delay, steps)| BackOffConfig::Sequence {
                        first_delay,
                        steps,
                    }),
            ]
        })
        .boxed()
    }
}
