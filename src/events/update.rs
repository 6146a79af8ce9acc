//! # Update events emitted by watch sessions.
//!
//! An [`UpdateEvent`] is written to the delivery channel each time a blocking
//! fetch returns an index greater than the last one delivered by the same
//! watch.
//!
//! ## Ordering guarantees
//! Within one watch, events arrive in strictly increasing `meta.index` order
//! and no two events share an index. Across watches sharing a channel there is
//! no ordering; match on `correlation_id`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use cachewatch::{ResultMeta, UpdateEvent};
//!
//! let ev = UpdateEvent {
//!     correlation_id: "svcA".into(),
//!     result: Some(Arc::new(String::from("v1"))),
//!     meta: ResultMeta::new(5),
//!     err: None,
//! };
//!
//! assert_eq!(ev.meta.index, 5);
//! assert_eq!(ev.value::<String>().map(String::as_str), Some("v1"));
//! ```

use crate::error::FetchError;
use crate::types::Value;

/// Metadata returned alongside every fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultMeta {
    /// Backend-assigned version of the value; monotonically non-decreasing per key.
    ///
    /// `0` means the backend did not report an index.
    pub index: u64,
    /// Whether the value was served without a backend round-trip.
    pub hit: bool,
}

impl ResultMeta {
    /// Creates metadata for a backend round-trip at `index`.
    pub fn new(index: u64) -> Self {
        Self { index, hit: false }
    }

    /// Marks the result as served from cache.
    pub fn with_hit(mut self, hit: bool) -> Self {
        self.hit = hit;
        self
    }
}

/// One change notification for a watched cache entry.
#[derive(Debug, Clone)]
pub struct UpdateEvent {
    /// Caller-chosen tag copied verbatim from the `notify` call.
    pub correlation_id: String,
    /// The fetched value; its concrete type is defined by the registered cache type.
    pub result: Option<Value>,
    /// Metadata of the fetch that produced this event.
    pub meta: ResultMeta,
    /// Error of the fetch that produced this event, `None` on success.
    ///
    /// An error here still came with an index advance; the watch keeps running.
    pub err: Option<FetchError>,
}

impl UpdateEvent {
    /// Downcasts the result to `T`.
    ///
    /// Returns `None` if there is no result or it is not a `T`.
    pub fn value<T: 'static>(&self) -> Option<&T> {
        self.result.as_deref()?.downcast_ref::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_value_downcast() {
        let ev = UpdateEvent {
            correlation_id: "a".into(),
            result: Some(Arc::new(42u32)),
            meta: ResultMeta::new(1),
            err: None,
        };
        assert_eq!(ev.value::<u32>(), Some(&42));
        assert_eq!(ev.value::<String>(), None);
        assert!(ev.err.is_none());
    }

    #[test]
    fn test_value_absent() {
        let ev = UpdateEvent {
            correlation_id: "a".into(),
            result: None,
            meta: ResultMeta::new(3).with_hit(true),
            err: Some(FetchError::failed("rpc error")),
        };
        assert_eq!(ev.value::<u32>(), None);
        assert!(ev.err.is_some());
        assert!(ev.meta.hit);
    }
}
