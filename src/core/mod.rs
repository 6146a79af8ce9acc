//! Watch engine core: registration and refresh loops.
//!
//! The public API from this module is [`Cache`] (type registry and
//! [`Cache::notify`]), its [`CacheBuilder`] and [`WatchConfig`].
//!
//! Internal modules:
//! - [`fetch`]: executes one blocking fetch with the configured upper bound;
//! - [`session`]: runs one watch (index cursor, change detection, backoff);
//! - [`registry`]: name to cache type lookup under a read/write lock;
//! - [`cache`]: validates watch requests and spawns sessions.

mod builder;
mod cache;
mod config;
mod fetch;
mod registry;
mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::CacheBuilder;
pub use cache::Cache;
pub use config::WatchConfig;
pub use registry::TypeRegistry;
