//! # Function-backed cache type (`TypeFn`)
//!
//! [`TypeFn`] wraps a closure `F: Fn(FetchOptions, Request) -> Fut`, producing
//! a fresh future per fetch. Shared state, if any, goes in an `Arc` captured
//! by the closure.
//!
//! ## Example
//! ```rust
//! use cachewatch::{Fetched, FetchOptions, Request, TypeFn, TypeRef};
//!
//! let t: TypeRef = TypeFn::blocking(|opts: FetchOptions, _req: Request| async move {
//!     Fetched::ok(vec!["web", "db"], opts.min_index + 1)
//! });
//!
//! assert!(t.supports_blocking());
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::types::cache_type::{CacheType, FetchOptions, Fetched, Request};

/// Function-backed cache type implementation.
#[derive(Debug)]
pub struct TypeFn<F> {
    blocking: bool,
    f: F,
}

impl<F> TypeFn<F> {
    /// Creates a new function-backed type.
    pub fn new(blocking: bool, f: F) -> Self {
        Self { blocking, f }
    }

    /// Creates a blocking type and returns it as a shared handle.
    pub fn blocking(f: F) -> Arc<Self> {
        Arc::new(Self::new(true, f))
    }

    /// Creates a non-blocking type and returns it as a shared handle.
    ///
    /// Such types can be registered but not watched.
    pub fn non_blocking(f: F) -> Arc<Self> {
        Arc::new(Self::new(false, f))
    }
}

#[async_trait]
impl<F, Fut> CacheType for TypeFn<F>
where
    F: Fn(FetchOptions, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Fetched> + Send + 'static,
{
    fn supports_blocking(&self) -> bool {
        self.blocking
    }

    async fn fetch(&self, opts: FetchOptions, request: Request) -> Fetched {
        (self.f)(opts, request).await
    }
}
