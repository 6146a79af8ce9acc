//! Backoff policies.
//!
//! This module groups the knobs that control **how long** a watch waits after
//! fetches that made no forward progress.
//!
//! ## Contents
//! - [`BackoffPolicy`] how delays evolve with consecutive failures (first / factor / max + jitter)
//! - [`JitterPolicy`]  randomization strategy to avoid thundering herd
//!
//! ## Quick wiring
//! ```text
//! WatchConfig { backoff: BackoffPolicy, jitter_seed: Option<u64>, .. }
//!      └─► core::session::WatchSession uses:
//!           - backoff.delay(failures, &mut rng) after every fetch
//! ```
//!
//! ## Defaults
//! - `BackoffPolicy::default()` → first=1s, factor=2.0, max=60s, jitter=None.
//! - `JitterPolicy::None` by default; consider `Equal` when many watches hit one backend.

mod backoff;
mod jitter;

pub use backoff::BackoffPolicy;
pub use jitter::JitterPolicy;
