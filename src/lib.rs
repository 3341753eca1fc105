//! # tinybackoff
//!
//! Small, pure back-off strategies for retry loops.
//!
//! A back-off decides two things for each retry: whether another attempt is
//! allowed, and how long to wait before it. This crate only computes those
//! answers. Running the operation, sleeping, and giving up early all stay in
//! the caller's retry loop.
//!
//! ## Quick Example
//!
//! ```rust
//! use tinybackoff::{combine, BackOff, Constant, Linear};
//! use std::time::Duration;
//!
//! // Wait 50 minutes once, then 10s twice, then grow linearly from 90s.
//! let mut backoff = combine(
//!     Some(Duration::from_secs(50 * 60)),
//!     vec![
//!         Constant::new(Duration::from_secs(10)).with_max_attempts(2).boxed(),
//!         Linear::new(Duration::from_secs(60), Duration::from_secs(30), 5)
//!             .with_max_attempts(5)
//!             .boxed(),
//!     ],
//! );
//!
//! let mut attempts = 0;
//! while backoff.can_continue() {
//!     let _delay = backoff.next_delay();
//!     // sleep for the delay, retry the operation, break on success
//!     attempts += 1;
//! }
//!
//! assert_eq!(attempts, 8);
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`BackOffConfig`]
//! - `tracing`: trace events from [`Limited`] and [`Sequence`]
//! - `proptest`: `Arbitrary` for [`BackOffConfig`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod backoff;
pub mod config;
pub mod testing;

// Re-exports
pub use backoff::{
    combine, with_max_attempts, BackOff, Constant, Delays, Exponential, Limited, Linear, Power,
    Sequence,
};
pub use config::BackOffConfig;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::backoff::{
        combine, BackOff, Constant, Exponential, Limited, Linear, Power, Sequence,
    };
    pub use crate::config::BackOffConfig;
}
