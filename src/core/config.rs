//! # Watch engine configuration.
//!
//! Provides [`WatchConfig`], the settings shared by every watch a [`Cache`](crate::Cache)
//! starts. The config is captured once per watch at registration; changing it
//! later does not affect running watches.
//!
//! ## Sentinel values
//! - `fetch_timeout = 0s` → fetches are unbounded
//! - `warn_after = 0` → backoff is never logged at `warn`

use std::time::Duration;

use crate::policies::BackoffPolicy;

/// Configuration for the watch engine.
///
/// ## Field semantics
/// - `backoff`: Delay curve applied after fetches that made no progress
/// - `fetch_timeout`: Upper bound on one blocking fetch (`0s` = unbounded)
/// - `jitter_seed`: Seed of each session's jitter generator (`None` = seeded from the OS)
/// - `warn_after`: Consecutive failures at which backoff logging escalates to `warn` (`0` = never)
#[derive(Clone, Debug)]
pub struct WatchConfig {
    /// Backoff applied after failed or non-progressing fetches.
    pub backoff: BackoffPolicy,

    /// Maximum time a single blocking fetch may take.
    ///
    /// A fetch that exceeds it resolves to [`FetchError::Timeout`](crate::FetchError)
    /// with index 0, which counts as a failure and delivers nothing. Keep it
    /// above the backend's own blocking wait.
    pub fetch_timeout: Duration,

    /// Seed for the per-session jitter generator.
    ///
    /// With `Some(seed)` every session starts from the same seed, which makes
    /// jittered delays reproducible.
    pub jitter_seed: Option<u64>,

    /// Consecutive failures after which backoff is logged at `warn`.
    pub warn_after: u32,
}

impl WatchConfig {
    /// Returns the fetch upper bound as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(d)` → each fetch is cut off after `d`
    #[inline]
    pub fn fetch_timeout(&self) -> Option<Duration> {
        if self.fetch_timeout == Duration::ZERO {
            None
        } else {
            Some(self.fetch_timeout)
        }
    }

    /// Returns whether `failures` has reached the warn threshold.
    #[inline]
    pub fn should_warn(&self, failures: u32) -> bool {
        self.warn_after != 0 && failures >= self.warn_after
    }
}

impl Default for WatchConfig {
    /// Default configuration:
    ///
    /// - `backoff = BackoffPolicy::default()` (1s doubling up to 60s)
    /// - `fetch_timeout = 10min`
    /// - `jitter_seed = None`
    /// - `warn_after = 5`
    fn default() -> Self {
        Self {
            backoff: BackoffPolicy::default(),
            fetch_timeout: Duration::from_secs(10 * 60),
            jitter_seed: None,
            warn_after: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_is_unbounded() {
        let cfg = WatchConfig {
            fetch_timeout: Duration::ZERO,
            ..WatchConfig::default()
        };
        assert_eq!(cfg.fetch_timeout(), None);
        assert_eq!(
            WatchConfig::default().fetch_timeout(),
            Some(Duration::from_secs(600))
        );
    }

    #[test]
    fn test_warn_threshold() {
        let mut cfg = WatchConfig::default();
        assert!(!cfg.should_warn(4));
        assert!(cfg.should_warn(5));
        cfg.warn_after = 0;
        assert!(!cfg.should_warn(u32::MAX));
    }
}
