//! # cachewatch
//!
//! **cachewatch** keeps cached results in sync with a blocking-query backend
//! (one that versions values with a monotonically increasing index and lets
//! clients long-poll for changes) and tells consumers when a value changed.
//!
//! A consumer registers a watch with [`Cache::notify`]; a background session
//! then re-fetches the value with blocking semantics and writes an
//! [`UpdateEvent`] to the consumer's channel only when the index advances.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     notify(token, "catalog", req, "svcA", tx)      notify(token, "health", ...)
//!                    │                                          │
//!                    ▼                                          ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Cache                                                            │
//! │  - TypeRegistry (name → CacheType, read lock on lookup)           │
//! │  - WatchConfig  (backoff, fetch timeout, jitter seed)             │
//! └──────┬──────────────────────────────────────────────┬─────────────┘
//!        ▼ tokio::spawn                                 ▼ tokio::spawn
//!     ┌──────────────┐                               ┌──────────────┐
//!     │ WatchSession │                               │ WatchSession │
//!     │ (index loop) │                               │ (index loop) │
//!     └┬───────────┬─┘                               └┬───────────┬─┘
//!      │           │ UpdateEvent                      │           │
//!      ▼           ▼                                  ▼           ▼
//!  CacheType   mpsc::Sender ─────────► consumer ◄──── mpsc::Sender  CacheType
//!   ::fetch                        (shared or not)
//! ```
//!
//! ### Lifecycle
//! ```text
//! index = 0 ──► fetch(min_index = index)
//!                 ├─ index advanced ─► send UpdateEvent ─► index = meta.index
//!                 ├─ ok, index > 0   ─► failures = 0
//!                 └─ error / index 0 ─► failures += 1 ─► sleep(backoff(failures))
//!               index = max(index, 1) ─► next fetch blocks server-side
//!
//! exit (silently): token cancelled, or the receiver was dropped
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                    |
//! |-------------------|-------------------------------------------------------------|---------------------------------------|
//! | **Watches**       | Register change notifications for a cache key.              | [`Cache`], [`UpdateEvent`]            |
//! | **Types**         | Plug in how values are fetched.                             | [`CacheType`], [`TypeFn`], [`TypeRef`]|
//! | **Policies**      | Configure backoff after failing fetches.                    | [`BackoffPolicy`], [`JitterPolicy`]   |
//! | **Errors**        | Typed errors for registration and fetches.                  | [`NotifyError`], [`FetchError`]       |
//! | **Configuration** | Centralize watch settings.                                  | [`WatchConfig`]                       |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use tokio_util::sync::CancellationToken;
//! use cachewatch::{Cache, Fetched, FetchOptions, Request, TypeFn, WatchConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let services = TypeFn::blocking(|opts: FetchOptions, _req: Request| async move {
//!         // Pretend the backend moves one index per blocking call.
//!         Fetched::ok(vec!["web", "db"], opts.min_index + 1)
//!     });
//!
//!     let cache = Cache::builder(WatchConfig::default())
//!         .with_type("catalog-services", services)
//!         .build();
//!
//!     let (tx, mut rx) = mpsc::channel(1);
//!     let token = CancellationToken::new();
//!     cache
//!         .notify(token.clone(), "catalog-services", Arc::new("dc1"), "svcA", tx)
//!         .await?;
//!
//!     let first = rx.recv().await.expect("initial value");
//!     let second = rx.recv().await.expect("next change");
//!     assert_eq!(first.correlation_id, "svcA");
//!     assert!(first.meta.index < second.meta.index);
//!
//!     token.cancel();
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod policies;
mod types;

// ---- Public re-exports ----

pub use core::{Cache, CacheBuilder, TypeRegistry, WatchConfig};
pub use error::{FetchError, NotifyError};
pub use events::{ResultMeta, UpdateEvent};
pub use policies::{BackoffPolicy, JitterPolicy};
pub use types::{CacheType, FetchOptions, Fetched, Request, TypeFn, TypeRef, Value};
