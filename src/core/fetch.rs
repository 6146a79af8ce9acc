//! # Run a single blocking fetch.
//!
//! Calls a [`CacheType`] once with the given `min_index`, bounded by the
//! configured fetch timeout.
//!
//! ## Rules
//! - Exactly one call to [`CacheType::fetch`] per invocation
//! - On timeout the type's future is dropped and the outcome is
//!   [`FetchError::Timeout`] with index 0 (never an index advance)
//! - Cancellation is not handled here; callers race this future against
//!   their token

use std::time::Duration;

use tokio::time;

use crate::{
    error::FetchError,
    types::{CacheType, FetchOptions, Fetched, Request},
};

/// Executes one fetch of `request` against `ty`.
pub async fn fetch_once<T: CacheType + ?Sized>(
    ty: &T,
    request: &Request,
    min_index: u64,
    timeout: Option<Duration>,
) -> Fetched {
    let opts = FetchOptions { min_index, timeout };
    let fut = ty.fetch(opts, request.clone());

    match timeout {
        Some(dur) => match time::timeout(dur, fut).await {
            Ok(fetched) => fetched,
            Err(_elapsed) => Fetched::failed(FetchError::Timeout { timeout: dur }),
        },
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeFn;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_timeout_yields_failure_without_index() {
        let ty = TypeFn::new(true, |_o: FetchOptions, _r: Request| async {
            std::future::pending::<Fetched>().await
        });
        let req: Request = Arc::new(());

        let out = fetch_once(&ty, &req, 7, Some(Duration::from_secs(5))).await;

        assert_eq!(out.meta.index, 0);
        assert!(out.error.as_ref().is_some_and(FetchError::is_timeout));
        assert!(out.value.is_none());
    }

    #[tokio::test]
    async fn test_passes_options_through() {
        let ty = TypeFn::new(true, |o: FetchOptions, _r: Request| async move {
            Fetched::ok(o, o.min_index + 1)
        });
        let req: Request = Arc::new("key");
        let bound = Some(Duration::from_secs(30));

        let out = fetch_once(&ty, &req, 41, bound).await;

        assert_eq!(out.meta.index, 42);
        let seen = out
            .value
            .as_deref()
            .and_then(|v| v.downcast_ref::<FetchOptions>())
            .copied();
        assert_eq!(
            seen,
            Some(FetchOptions {
                min_index: 41,
                timeout: bound
            })
        );
    }
}
