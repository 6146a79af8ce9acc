//! # Cache type trait and blocking-fetch data types.
//!
//! A cache type knows how to fetch one kind of value (e.g. a service catalog
//! listing) for an opaque request. Types that support blocking queries wait
//! server-side until the value's index exceeds [`FetchOptions::min_index`] or
//! their own timeout elapses.
//!
//! Requests and results are type-erased; the registered type defines their
//! concrete shape and downcasts as needed.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::events::ResultMeta;

/// Opaque, type-specific fetch descriptor.
pub type Request = Arc<dyn Any + Send + Sync>;

/// Opaque fetched value.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Shared handle to a cache type.
pub type TypeRef = Arc<dyn CacheType>;

/// Parameters of one blocking fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Return only once the value's index is at least this.
    ///
    /// `0` asks for whatever is currently known, without waiting.
    pub min_index: u64,
    /// Client-side upper bound the cache enforces on this fetch (`None` = unbounded).
    ///
    /// Types should keep their own server-side wait below it.
    pub timeout: Option<Duration>,
}

/// Outcome of one blocking fetch.
///
/// `error` may be set alongside a meaningful `meta.index`.
#[derive(Debug, Clone, Default)]
pub struct Fetched {
    /// The fetched value, if any.
    pub value: Option<Value>,
    /// Fetch metadata.
    pub meta: ResultMeta,
    /// Error of this attempt, `None` on success.
    pub error: Option<FetchError>,
}

impl Fetched {
    /// A successful fetch of `value` at `index`.
    pub fn ok<T: Any + Send + Sync>(value: T, index: u64) -> Self {
        Self {
            value: Some(Arc::new(value)),
            meta: ResultMeta::new(index),
            error: None,
        }
    }

    /// A failed fetch with no value and no index.
    pub fn failed(error: FetchError) -> Self {
        Self {
            value: None,
            meta: ResultMeta::default(),
            error: Some(error),
        }
    }

    /// Replaces the metadata.
    pub fn with_meta(mut self, meta: ResultMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Attaches an error while keeping value and metadata.
    pub fn with_error(mut self, error: FetchError) -> Self {
        self.error = Some(error);
        self
    }
}

/// # A kind of value the cache can fetch.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use cachewatch::{CacheType, FetchOptions, Fetched, Request};
///
/// struct Leader;
///
/// #[async_trait]
/// impl CacheType for Leader {
///     fn supports_blocking(&self) -> bool { true }
///
///     async fn fetch(&self, opts: FetchOptions, _req: Request) -> Fetched {
///         // long-poll the backend with opts.min_index...
///         Fetched::ok(String::from("10.0.0.1:8300"), opts.min_index.max(1))
///     }
/// }
/// ```
#[async_trait]
pub trait CacheType: Send + Sync + 'static {
    /// Whether [`fetch`](CacheType::fetch) honors `min_index` by blocking.
    ///
    /// Only blocking types can be watched.
    fn supports_blocking(&self) -> bool;

    /// Fetches the value for `request`.
    ///
    /// Blocking types should not return before the index reaches
    /// `opts.min_index` unless their own timeout elapses or an error occurs.
    async fn fetch(&self, opts: FetchOptions, request: Request) -> Fetched;
}
