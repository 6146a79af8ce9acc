//! # Jitter policy for backoff delays.
//!
//! [`JitterPolicy`] adds randomness to backoff delays so that many watches
//! failing against the same backend do not retry in lockstep.
//!
//! - [`JitterPolicy::None`] — no randomization, predictable delays
//! - [`JitterPolicy::Full`] — random delay in [floor, backoff_delay]
//! - [`JitterPolicy::Equal`] — delay = backoff_delay/2 + random[0, backoff_delay/2]
//!
//! A non-zero delay never jitters down to zero: results are floored at 1ms,
//! or at the delay itself when it is shorter.
//!
//! The generator is always passed in by the caller. Each watch session owns
//! its own seeded generator, so the same seed and failure sequence reproduce
//! the same delays.

use rand::Rng;
use std::time::Duration;

/// Policy controlling randomization of backoff delays.
///
/// ## Trade-offs
/// - **None**: Predictable and non-decreasing, but risks thundering herd
/// - **Full**: Maximum randomness, can shrink a delay down to the floor
/// - **Equal**: Keeps at least half of the base delay (recommended for fleets)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// No jitter: use exact backoff delay.
    #[default]
    None,

    /// Full jitter: random delay in [min(1ms, backoff_delay), backoff_delay].
    Full,

    /// Equal jitter: delay = backoff_delay/2 + random[0, backoff_delay/2].
    Equal,
}

impl JitterPolicy {
    /// Applies jitter to the given delay using `rng`.
    pub fn apply<R: Rng + ?Sized>(&self, delay: Duration, rng: &mut R) -> Duration {
        match self {
            JitterPolicy::None => delay,
            JitterPolicy::Full => full_jitter(delay, rng),
            JitterPolicy::Equal => equal_jitter(delay, rng),
        }
    }
}

/// Smallest jittered delay for a non-zero base; bases below it are kept as-is.
const MIN_JITTERED: Duration = Duration::from_millis(1);

/// Full jitter: random[floor, delay]
fn full_jitter<R: Rng + ?Sized>(delay: Duration, rng: &mut R) -> Duration {
    let ns = as_nanos(delay);
    if ns == 0 {
        return Duration::ZERO;
    }
    let floor = as_nanos(MIN_JITTERED).min(ns);
    Duration::from_nanos(rng.random_range(floor..=ns))
}

/// Equal jitter: delay/2 + random[0, delay/2], never below the floor
fn equal_jitter<R: Rng + ?Sized>(delay: Duration, rng: &mut R) -> Duration {
    let ns = as_nanos(delay);
    if ns == 0 {
        return Duration::ZERO;
    }
    let half = ns / 2;
    let jitter = if half == 0 {
        0
    } else {
        rng.random_range(0..=half)
    };
    let floor = as_nanos(MIN_JITTERED).min(ns);
    Duration::from_nanos((ns - half + jitter).clamp(floor, ns))
}

fn as_nanos(d: Duration) -> u64 {
    d.as_nanos().min(u64::MAX as u128) as u64
}
