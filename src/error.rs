//! Error types used by the cache watch engine.
//!
//! This module defines two error enums:
//!
//! - [`NotifyError`] — registration-time errors returned synchronously by
//!   [`Cache::notify`](crate::Cache::notify).
//! - [`FetchError`] — errors of a single blocking fetch; carried inside
//!   [`UpdateEvent::err`](crate::UpdateEvent) and never fatal to a watch.
//!
//! Both types provide `as_label` for logging.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced when registering a watch.
///
/// Both variants are returned before any background work starts and are
/// recoverable by the caller (fix the type name, or watch a type that
/// supports blocking queries).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// No type is registered under the given name.
    #[error("unknown type in cache: {type_name}")]
    UnknownType {
        /// The type name passed to `notify`.
        type_name: String,
    },

    /// The registered type cannot serve blocking queries.
    #[error("watch requires the type to support blocking: {type_name}")]
    Unsupported {
        /// The type name passed to `notify`.
        type_name: String,
    },
}

impl NotifyError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use cachewatch::NotifyError;
    ///
    /// let err = NotifyError::UnknownType { type_name: "catalog-services".into() };
    /// assert_eq!(err.as_label(), "notify_unknown_type");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            NotifyError::UnknownType { .. } => "notify_unknown_type",
            NotifyError::Unsupported { .. } => "notify_unsupported",
        }
    }
}

/// # Errors produced by a single blocking fetch.
///
/// A fetch error may accompany a still-meaningful index; the watch loop only
/// surfaces it to the consumer when the index advanced, otherwise it just
/// drives the backoff counter.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The backend reported a failure.
    #[error("fetch failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// The fetch did not return within the configured upper bound.
    #[error("fetch timed out after {timeout:?}")]
    Timeout {
        /// The bound that was exceeded.
        timeout: Duration,
    },

    /// The type is no longer registered in the cache.
    #[error("unknown type in cache: {type_name}")]
    UnknownType {
        /// The type name that failed to resolve.
        type_name: String,
    },
}

impl FetchError {
    /// Shorthand for [`FetchError::Failed`].
    pub fn failed(error: impl Into<String>) -> Self {
        FetchError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            FetchError::Failed { .. } => "fetch_failed",
            FetchError::Timeout { .. } => "fetch_timeout",
            FetchError::UnknownType { .. } => "fetch_unknown_type",
        }
    }

    /// Returns `true` if the fetch hit the client-side upper bound.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(
            NotifyError::Unsupported {
                type_name: "t".into()
            }
            .as_label(),
            "notify_unsupported"
        );
        assert_eq!(FetchError::failed("boom").as_label(), "fetch_failed");
        assert_eq!(
            FetchError::Timeout {
                timeout: Duration::from_secs(1)
            }
            .as_label(),
            "fetch_timeout"
        );
    }

    #[test]
    fn test_display_names_the_type() {
        let err = NotifyError::UnknownType {
            type_name: "health-services".into(),
        };
        assert_eq!(err.to_string(), "unknown type in cache: health-services");
    }

    #[test]
    fn test_is_timeout() {
        assert!(FetchError::Timeout {
            timeout: Duration::from_secs(1)
        }
        .is_timeout());
        assert!(!FetchError::failed("boom").is_timeout());
    }
}
