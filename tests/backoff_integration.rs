//! Integration tests driving back-offs the way a retry loop does.

use std::time::Duration;
use tinybackoff::prelude::*;
use tinybackoff::testing::drain;
use tinybackoff::{assert_delays, assert_exhausted};

const ATTEMPTS: u64 = 4;
const DELAY: Duration = Duration::from_millis(100);

#[test]
fn constant_backoff_returns_same_delay() {
    let mut backoff = tinybackoff::with_max_attempts(Constant::new(DELAY), ATTEMPTS);

    for _ in 0..ATTEMPTS {
        assert!(backoff.can_continue());
        assert_eq!(backoff.next_delay(), DELAY);
    }

    assert!(!backoff.can_continue());
}

#[test]
fn linear_backoff_grows_linearly() {
    let multiplier = Duration::from_millis(50);
    let mut backoff = Linear::new(DELAY, multiplier, ATTEMPTS);

    for attempt in 1..=ATTEMPTS as u32 {
        assert!(backoff.can_continue());
        assert_eq!(backoff.next_delay(), DELAY + multiplier * attempt);
    }

    assert!(!backoff.can_continue());
}

#[test]
fn power_backoff_grows_by_powers_of_base() {
    let base = 2u32;
    let mut backoff = Power::new(DELAY, u64::from(base), ATTEMPTS);

    for attempt in 1..=ATTEMPTS as u32 {
        assert_eq!(backoff.next_delay(), DELAY * base.pow(attempt));
    }

    assert!(!backoff.can_continue());
}

#[test]
fn exponential_backoff_grows_until_max_delay() {
    let max_delay = Duration::from_secs(24 * 60 * 60);
    let attempts = 7u64;
    let mut backoff = Exponential::new(max_delay, attempts);

    let mut previous = Duration::ZERO;
    for attempt in 1..=attempts {
        let expected = max_delay.as_nanos() as f64 / ((attempts - attempt) as f64).exp();
        let delay = backoff.next_delay();

        assert_eq!(delay, Duration::from_nanos(expected as u64));
        assert!(delay > previous);
        previous = delay;
    }

    assert_eq!(previous, max_delay);
    assert!(!backoff.can_continue());
}

#[test]
fn combine_chains_backoffs() {
    let first = Duration::from_secs(50 * 60);
    let mut backoff = combine(
        Some(first),
        vec![
            Constant::new(Duration::from_secs(10))
                .with_max_attempts(2)
                .boxed(),
            Linear::new(Duration::from_secs(60), Duration::from_secs(30), 5)
                .with_max_attempts(5)
                .boxed(),
        ],
    );

    let mut delays = Vec::new();
    while backoff.can_continue() {
        delays.push(backoff.next_delay());
        assert!(delays.len() <= 8, "can_continue was true too many times");
    }

    let expected: Vec<_> = [3000, 10, 10, 90, 120, 150, 180, 210]
        .into_iter()
        .map(Duration::from_secs)
        .collect();
    assert_eq!(delays, expected);
}

#[test]
fn combine_builder_matches_function() {
    let built = Sequence::new()
        .with_first_delay(Duration::from_secs(1))
        .then(Constant::new(Duration::from_secs(2)).with_max_attempts(1))
        .then(Exponential::new(Duration::from_secs(8), 1));

    let combined = combine(
        Some(Duration::from_secs(1)),
        vec![
            Constant::new(Duration::from_secs(2))
                .with_max_attempts(1)
                .boxed(),
            Exponential::new(Duration::from_secs(8), 1).boxed(),
        ],
    );

    assert_eq!(drain(built), drain(combined));
}

#[test]
fn combine_without_first_delay_or_steps_is_exhausted() {
    assert_exhausted!(combine(None, Vec::new()));
}

#[test]
fn combine_with_only_exhausted_steps_is_exhausted() {
    let backoff = combine(
        None,
        vec![
            Constant::new(DELAY).with_max_attempts(0).boxed(),
            Power::new(DELAY, 2, 0).boxed(),
        ],
    );

    assert_exhausted!(backoff);
}

#[test]
fn combine_skips_exhausted_step_between_live_ones() {
    assert_delays!(
        combine(
            None,
            vec![
                Constant::new(Duration::from_secs(1))
                    .with_max_attempts(1)
                    .boxed(),
                Linear::new(DELAY, DELAY, 0).boxed(),
                Constant::new(Duration::from_secs(3))
                    .with_max_attempts(1)
                    .boxed(),
            ],
        ),
        [Duration::from_secs(1), Duration::from_secs(3)]
    );
}

#[test]
fn nested_sequences_flatten_in_order() {
    let inner = Sequence::new()
        .with_first_delay(Duration::from_secs(2))
        .then(Constant::new(Duration::from_secs(3)).with_max_attempts(1));

    assert_delays!(
        Sequence::new()
            .with_first_delay(Duration::from_secs(1))
            .then(inner)
            .then(Constant::new(Duration::from_secs(4)).with_max_attempts(1)),
        [
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(3),
            Duration::from_secs(4),
        ]
    );
}

#[test]
fn limiter_recaps_limited_strategy() {
    assert_delays!(
        Linear::new(Duration::ZERO, Duration::from_secs(1), 10).with_max_attempts(3),
        [
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(3),
        ]
    );
}

#[test]
fn identical_configuration_gives_identical_delays() {
    let make = || {
        Sequence::new()
            .with_first_delay(Duration::from_millis(7))
            .then(Power::new(Duration::from_millis(3), 3, 4))
            .then(Exponential::new(Duration::from_secs(1), 3))
    };

    assert_eq!(drain(make()), drain(make()));
}

#[test]
fn config_builds_the_combined_scenario() {
    let config = BackOffConfig::Sequence {
        first_delay: Some(Duration::from_secs(50 * 60)),
        steps: vec![
            BackOffConfig::constant(Duration::from_secs(10), 2),
            BackOffConfig::Linear {
                delay: Duration::from_secs(60),
                multiplier: Duration::from_secs(30),
                attempts: 5,
            }
            .with_max_attempts(5),
        ],
    };

    let delays: Vec<_> = config.build().delays().map(|d| d.as_secs()).collect();
    assert_eq!(delays, vec![3000, 10, 10, 90, 120, 150, 180, 210]);
}
