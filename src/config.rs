//! Plain-data descriptions of back-offs.
//!
//! A [`BackOffConfig`] is the recipe, a [`BackOff`] is the running instance.
//! Configs are cheap to clone, compare and (with the `serde` feature) store in
//! whatever settings format the application already uses. Every call to
//! [`BackOffConfig::build`] starts a fresh, independent back-off.
//!
//! # Example
//!
//! ```rust
//! use tinybackoff::{BackOff, BackOffConfig};
//! use std::time::Duration;
//!
//! let config = BackOffConfig::Sequence {
//!     first_delay: Some(Duration::from_secs(1)),
//!     steps: vec![BackOffConfig::Linear {
//!         delay: Duration::from_secs(2),
//!         multiplier: Duration::from_secs(1),
//!         attempts: 2,
//!     }],
//! };
//!
//! let delays: Vec<_> = config.build().delays().collect();
//! assert_eq!(
//!     delays,
//!     vec![Duration::from_secs(1), Duration::from_secs(3), Duration::from_secs(4)]
//! );
//! ```
//!
//! With `serde` enabled the enum is tagged by `"strategy"`:
//!
//! ```rust,ignore
//! let config: BackOffConfig = serde_json::from_str(r#"{
//!     "strategy": "limited",
//!     "max_attempts": 3,
//!     "backoff": { "strategy": "constant", "delay": { "secs": 1, "nanos": 0 } }
//! }"#)?;
//! ```

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::backoff::{BackOff, Constant, Exponential, Limited, Linear, Power, Sequence};

/// Description of a back-off strategy and its composition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "strategy", rename_all = "snake_case"))]
pub enum BackOffConfig {
    /// See [`Constant`].
    Constant {
        /// Delay returned on every attempt.
        delay: Duration,
    },
    /// See [`Linear`].
    Linear {
        /// Base delay.
        delay: Duration,
        /// Added once per attempt.
        multiplier: Duration,
        /// Number of delays allowed.
        attempts: u64,
    },
    /// See [`Power`].
    Power {
        /// Base delay.
        delay: Duration,
        /// Raised to the attempt number.
        base: u64,
        /// Number of delays allowed.
        attempts: u64,
    },
    /// See [`Exponential`].
    Exponential {
        /// Delay of the last attempt.
        max_delay: Duration,
        /// Number of delays allowed.
        attempts: u64,
    },
    /// See [`Limited`].
    Limited {
        /// Number of delays allowed.
        max_attempts: u64,
        /// The strategy being capped.
        backoff: Box<BackOffConfig>,
    },
    /// See [`Sequence`].
    Sequence {
        /// Delay returned before any step, if set.
        #[cfg_attr(feature = "serde", serde(default))]
        first_delay: Option<Duration>,
        /// Steps used in order.
        steps: Vec<BackOffConfig>,
    },
}

impl BackOffConfig {
    /// Shorthand for a limited constant back-off, the most common building block.
    pub fn constant(delay: Duration, max_attempts: u64) -> Self {
        BackOffConfig::Limited {
            max_attempts,
            backoff: Box::new(BackOffConfig::Constant { delay }),
        }
    }

    /// Cap this config at `max_attempts` delays.
    pub fn with_max_attempts(self, max_attempts: u64) -> Self {
        BackOffConfig::Limited {
            max_attempts,
            backoff: Box::new(self),
        }
    }

    /// Start a new back-off from this description.
    pub fn build(&self) -> Box<dyn BackOff + Send> {
        match self {
            BackOffConfig::Constant { delay } => Box::new(Constant::new(*delay)),
            BackOffConfig::Linear {
                delay,
                multiplier,
                attempts,
            } => Box::new(Linear::new(*delay, *multiplier, *attempts)),
            BackOffConfig::Power {
                delay,
                base,
                attempts,
            } => Box::new(Power::new(*delay, *base, *attempts)),
            BackOffConfig::Exponential {
                max_delay,
                attempts,
            } => Box::new(Exponential::new(*max_delay, *attempts)),
            BackOffConfig::Limited {
                max_attempts,
                backoff,
            } => Box::new(Limited::new(backoff.build(), *max_attempts)),
            BackOffConfig::Sequence { first_delay, steps } => {
                let mut sequence = Sequence::new();
                if let Some(delay) = first_delay {
                    sequence = sequence.with_first_delay(*delay);
                }
                for step in steps {
                    sequence.push(step.build());
                }
                Box::new(sequence)
            }
        }
    }
}
