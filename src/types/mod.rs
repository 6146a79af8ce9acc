//! # Cache type abstractions.
//!
//! This module provides the seam between the watch engine and whatever
//! actually talks to the backend:
//! - [`CacheType`] - trait for types that can fetch values for a request
//! - [`TypeFn`] - function-based cache type implementation
//! - [`TypeRef`] - shared reference to a type (`Arc<dyn CacheType>`)
//! - [`FetchOptions`], [`Fetched`] - the blocking-fetch call and its outcome
//! - [`Request`], [`Value`] - type-erased request and result payloads

mod cache_type;
mod type_fn;

pub use cache_type::{CacheType, FetchOptions, Fetched, Request, TypeRef, Value};
pub use type_fn::TypeFn;
