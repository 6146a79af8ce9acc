use std::sync::Arc;

use crate::{core::Cache, core::WatchConfig, types::TypeRef};

use super::registry::TypeRegistry;

/// Builder for constructing a [`Cache`] with pre-registered types.
pub struct CacheBuilder {
    cfg: WatchConfig,
    registry: TypeRegistry,
}

impl CacheBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: WatchConfig) -> Self {
        Self {
            cfg,
            registry: TypeRegistry::new(),
        }
    }

    /// Registers a cache type under `name`.
    ///
    /// A later call with the same name replaces the earlier type.
    pub fn with_type(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.registry.insert_owned(name.into(), ty);
        self
    }

    /// Builds and returns the shared cache.
    pub fn build(self) -> Arc<Cache> {
        Arc::new(Cache::with_registry(self.cfg, self.registry))
    }
}
