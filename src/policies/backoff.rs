//! # Backoff policy for failing watches.
//!
//! [`BackoffPolicy`] maps the number of consecutive failed fetches of a watch
//! to the time it waits before the next attempt. It is parameterized by:
//! - [`BackoffPolicy::first`] the delay after the first failure;
//! - [`BackoffPolicy::factor`] the multiplicative growth factor;
//! - [`BackoffPolicy::max`] the maximum delay cap.
//!
//! For `failures = 0` the delay is zero. For `failures = n > 0` the base delay
//! is `first × factor^(n-1)`, clamped to `max`, then jitter is applied. The base
//! is derived purely from the failure count, so the same count always yields
//! the same base delay.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use cachewatch::{BackoffPolicy, JitterPolicy};
//!
//! let backoff = BackoffPolicy {
//!     first: Duration::from_secs(1),
//!     max: Duration::from_secs(60),
//!     factor: 2.0,
//!     jitter: JitterPolicy::None,
//! };
//!
//! assert_eq!(backoff.base(0), Duration::ZERO);
//! assert_eq!(backoff.base(1), Duration::from_secs(1));
//! assert_eq!(backoff.base(3), Duration::from_secs(4));
//! assert_eq!(backoff.base(10), Duration::from_secs(60));
//! ```

use std::time::Duration;

use rand::Rng;

use crate::policies::jitter::JitterPolicy;

/// Failure-driven backoff policy.
#[derive(Clone, Copy, Debug)]
pub struct BackoffPolicy {
    /// Delay after the first failure.
    pub first: Duration,
    /// Maximum delay cap.
    pub max: Duration,
    /// Multiplicative growth factor (`>= 1.0` keeps the curve non-decreasing).
    pub factor: f64,
    /// Jitter policy to spread retries of many watches.
    pub jitter: JitterPolicy,
}

impl Default for BackoffPolicy {
    /// Returns a policy with:
    /// - `first = 1s`;
    /// - `factor = 2.0`;
    /// - `max = 60s`;
    /// - `jitter = None`.
    fn default() -> Self {
        Self {
            first: Duration::from_secs(1),
            max: Duration::from_secs(60),
            factor: 2.0,
            jitter: JitterPolicy::None,
        }
    }
}

impl BackoffPolicy {
    /// Computes the un-jittered delay for `failures` consecutive failures.
    ///
    /// Zero for `failures == 0`, otherwise `first × factor^(failures-1)`
    /// clamped to [`BackoffPolicy::max`]. Non-finite or negative intermediate
    /// values clamp to `max`.
    pub fn base(&self, failures: u32) -> Duration {
        if failures == 0 {
            return Duration::ZERO;
        }

        let max_secs = self.max.as_secs_f64();
        let exp = (failures - 1).min(i32::MAX as u32) as i32;
        let unclamped_secs = self.first.as_secs_f64() * self.factor.powi(exp);

        if !unclamped_secs.is_finite() || unclamped_secs < 0.0 || unclamped_secs > max_secs {
            self.max
        } else {
            Duration::from_secs_f64(unclamped_secs)
        }
    }

    /// Computes the delay for `failures`, applying [`BackoffPolicy::jitter`]
    /// with the caller's generator.
    pub fn delay<R: Rng + ?Sized>(&self, failures: u32, rng: &mut R) -> Duration {
        self.jitter.apply(self.base(failures), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn policy(jitter: JitterPolicy) -> BackoffPolicy {
        BackoffPolicy {
            first: Duration::from_millis(100),
            max: Duration::from_secs(30),
            factor: 2.0,
            jitter,
        }
    }

    #[test]
    fn test_zero_failures_no_wait() {
        let mut rng = StdRng::seed_from_u64(1);
        for jitter in [JitterPolicy::None, JitterPolicy::Full, JitterPolicy::Equal] {
            assert_eq!(policy(jitter).delay(0, &mut rng), Duration::ZERO);
        }
    }

    #[test]
    fn test_failures_always_wait() {
        let mut rng = StdRng::seed_from_u64(5);
        for first in [
            Duration::from_micros(1),
            Duration::from_micros(500),
            Duration::from_millis(100),
        ] {
            for jitter in [JitterPolicy::None, JitterPolicy::Full, JitterPolicy::Equal] {
                let p = BackoffPolicy {
                    first,
                    max: Duration::from_micros(900).max(first),
                    factor: 2.0,
                    jitter,
                };
                for failures in 1..64 {
                    let d = p.delay(failures, &mut rng);
                    assert!(
                        d > Duration::ZERO,
                        "{jitter:?} first={first:?} failures={failures}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_exponential_growth_no_jitter() {
        let p = policy(JitterPolicy::None);
        assert_eq!(p.base(1), Duration::from_millis(100));
        assert_eq!(p.base(2), Duration::from_millis(200));
        assert_eq!(p.base(3), Duration::from_millis(400));
        assert_eq!(p.base(4), Duration::from_millis(800));
        assert_eq!(p.base(5), Duration::from_millis(1600));
    }

    #[test]
    fn test_base_is_non_decreasing() {
        let p = policy(JitterPolicy::None);
        let mut prev = Duration::ZERO;
        for failures in 0..200 {
            let d = p.base(failures);
            assert!(d >= prev, "failures {failures}: {d:?} < {prev:?}");
            prev = d;
        }
        assert_eq!(prev, Duration::from_secs(30));
    }

    #[test]
    fn test_constant_factor() {
        let p = BackoffPolicy {
            first: Duration::from_millis(500),
            factor: 1.0,
            ..policy(JitterPolicy::None)
        };
        for failures in 1..10 {
            assert_eq!(p.base(failures), Duration::from_millis(500));
        }
    }

    #[test]
    fn test_first_exceeds_max() {
        let p = BackoffPolicy {
            first: Duration::from_secs(10),
            max: Duration::from_secs(5),
            ..policy(JitterPolicy::None)
        };
        assert_eq!(p.base(1), Duration::from_secs(5));
    }

    #[test]
    fn test_huge_failure_count_clamps_to_max() {
        let p = policy(JitterPolicy::None);
        assert_eq!(p.base(100), Duration::from_secs(30));
        assert_eq!(p.base(u32::MAX), Duration::from_secs(30));
    }

    #[test]
    fn test_equal_jitter_bounds() {
        let p = policy(JitterPolicy::Equal);
        let mut rng = StdRng::seed_from_u64(9);
        for failures in 1..15 {
            let base = p.base(failures);
            let delay = p.delay(failures, &mut rng);
            assert!(delay >= base / 2, "failures {failures}: {delay:?} < half of {base:?}");
            assert!(delay <= base, "failures {failures}: {delay:?} > {base:?}");
        }
    }

    #[test]
    fn test_full_jitter_bounds() {
        let p = policy(JitterPolicy::Full);
        let mut rng = StdRng::seed_from_u64(9);
        for failures in 1..15 {
            assert!(p.delay(failures, &mut rng) <= p.base(failures));
        }
    }
}
