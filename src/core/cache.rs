//! # Cache: type registry front end and watch registrar.
//!
//! The [`Cache`] owns the [`TypeRegistry`] and the [`WatchConfig`]. Its main
//! entry point is [`Cache::notify`], which validates a watch request and
//! starts a detached [`WatchSession`] for it.
//!
//! ## High-level architecture
//! ```text
//! notify(token, type, request, correlation_id, tx)
//!   ├─► registry.lookup(type)        (read lock, once)
//!   │     ├─ None                    → Err(UnknownType)
//!   │     └─ !supports_blocking()    → Err(Unsupported)
//!   └─► tokio::spawn(WatchSession::run(token))   → Ok(())
//!
//! WatchSession ── fetch_once(type, request, index) ──► CacheType::fetch
//!              ── tx.send(UpdateEvent) ──► consumer
//! ```
//!
//! - Each `notify` call starts its own session; nothing is deduplicated.
//! - The only handles to a session are the token and the channel: cancel the
//!   token or drop the receiver to stop it.
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
//!     let leader = TypeFn::blocking(|opts: FetchOptions, _req: Request| async move {
//!         if opts.min_index > 0 {
//!             // a real type would long-poll the backend here
//!             std::future::pending::<()>().await;
//!         }
//!         Fetched::ok(String::from("10.0.0.1:8300"), 7)
//!     });
//!
//!     let cache = Cache::builder(WatchConfig::default())
//!         .with_type("leader", leader)
//!         .build();
//!
//!     let (tx, mut rx) = mpsc::channel(4);
//!     let token = CancellationToken::new();
//!     cache.notify(token.clone(), "leader", Arc::new(()), "leader-watch", tx).await?;
//!
//!     let ev = rx.recv().await.expect("initial value");
//!     assert_eq!(ev.correlation_id, "leader-watch");
//!     assert_eq!(ev.meta.index, 7);
//!
//!     token.cancel();
//!     Ok(())
//! }
//! ```

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        builder::CacheBuilder, config::WatchConfig, fetch::fetch_once, registry::TypeRegistry,
        session::WatchSession,
    },
    error::{FetchError, NotifyError},
    events::UpdateEvent,
    types::{Fetched, Request, TypeRef},
};

/// Registry of cache types plus the watch registrar.
pub struct Cache {
    cfg: WatchConfig,
    registry: TypeRegistry,
}

impl Cache {
    /// Creates an empty cache with the given config.
    pub fn new(cfg: WatchConfig) -> Self {
        Self::with_registry(cfg, TypeRegistry::new())
    }

    pub(crate) fn with_registry(cfg: WatchConfig, registry: TypeRegistry) -> Self {
        Self { cfg, registry }
    }

    /// Returns a builder that can pre-register types.
    pub fn builder(cfg: WatchConfig) -> CacheBuilder {
        CacheBuilder::new(cfg)
    }

    /// Registers a cache type under `name`, replacing any previous one.
    ///
    /// Running watches keep the type they resolved at registration.
    pub async fn register(&self, name: impl Into<String>, ty: TypeRef) {
        let name = name.into();
        if self.registry.register(name.clone(), ty).await.is_some() {
            tracing::debug!(type_name = %name, "cache type replaced");
        } else {
            tracing::debug!(type_name = %name, "cache type registered");
        }
    }

    /// Looks up a registered type.
    pub async fn lookup_type(&self, name: &str) -> Option<TypeRef> {
        self.registry.lookup(name).await
    }

    /// Returns sorted names of registered types.
    pub async fn type_names(&self) -> Vec<String> {
        self.registry.names().await
    }

    /// Performs one blocking fetch of `request` for the type registered as
    /// `type_name`, returning once the index reaches `min_index` or the type
    /// gives up.
    ///
    /// Bounded by [`WatchConfig::fetch_timeout`]. An unregistered type
    /// resolves to [`FetchError::UnknownType`].
    pub async fn get_with_index(
        &self,
        type_name: &str,
        request: &Request,
        min_index: u64,
    ) -> Fetched {
        match self.registry.lookup(type_name).await {
            Some(ty) => {
                fetch_once(ty.as_ref(), request, min_index, self.cfg.fetch_timeout()).await
            }
            None => Fetched::failed(FetchError::UnknownType {
                type_name: type_name.to_string(),
            }),
        }
    }

    /// Registers a desire to be told about changes to a cached result.
    ///
    /// Starts a background session that keeps fetching `request` with
    /// blocking semantics and sends an [`UpdateEvent`] on `tx` each time the
    /// index advances. The first event carries the currently known value.
    ///
    /// ### Errors
    /// - [`NotifyError::UnknownType`] if no type is registered as `type_name`
    /// - [`NotifyError::Unsupported`] if the type does not support blocking
    ///
    /// Both are returned before anything is spawned. `Ok(())` means the
    /// session started, not that anything was delivered.
    ///
    /// ### Lifetime
    /// The session runs until `token` is cancelled or the receiver of `tx` is
    /// dropped. A long-lived token must be cancelled by the caller once the
    /// watch is no longer needed.
    ///
    /// ### Backpressure
    /// `tx` may have any capacity. If the consumer does not keep up the
    /// session waits on the send and does not fetch again until there is
    /// room; nothing is dropped. A capacity of 1 runs in rendezvous mode:
    /// each send completes only once the consumer has taken the event. Sharing one channel across watches is fine;
    /// `correlation_id` is copied into every event of this watch to tell
    /// them apart.
    pub async fn notify(
        &self,
        token: CancellationToken,
        type_name: &str,
        request: Request,
        correlation_id: impl Into<String>,
        tx: mpsc::Sender<UpdateEvent>,
    ) -> Result<(), NotifyError> {
        let ty = self
            .registry
            .lookup(type_name)
            .await
            .ok_or_else(|| NotifyError::UnknownType {
                type_name: type_name.to_string(),
            })?;
        if !ty.supports_blocking() {
            return Err(NotifyError::Unsupported {
                type_name: type_name.to_string(),
            });
        }

        let correlation_id = correlation_id.into();
        tracing::debug!(
            type_name,
            correlation_id = %correlation_id,
            "watch registered"
        );

        let session = WatchSession::new(
            type_name,
            ty,
            request,
            correlation_id,
            tx,
            self.cfg.clone(),
        );
        tokio::spawn(session.run(token));
        Ok(())
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new(WatchConfig::default())
    }
}
