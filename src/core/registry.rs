//! # Type registry - name to cache type lookup.
//!
//! ## Rules
//! - Lookups take the shared (read) lock; registration takes the write lock
//! - Watches resolve their type once, at registration; re-registering a name
//!   only affects watches started afterwards

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::types::TypeRef;

/// Registry of cache types by name.
#[derive(Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<String, TypeRef>>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `ty` under `name`, returning the type it replaced, if any.
    pub async fn register(&self, name: impl Into<String>, ty: TypeRef) -> Option<TypeRef> {
        let mut types = self.types.write().await;
        types.insert(name.into(), ty)
    }

    /// Looks up a type by name.
    pub async fn lookup(&self, name: &str) -> Option<TypeRef> {
        let types = self.types.read().await;
        types.get(name).cloned()
    }

    /// Returns sorted list of registered type names.
    pub async fn names(&self) -> Vec<String> {
        let types = self.types.read().await;
        let mut names: Vec<String> = types.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Fills the registry before it is shared.
    pub(crate) fn insert_owned(&mut self, name: String, ty: TypeRef) {
        self.types.get_mut().insert(name, ty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FetchOptions, Fetched, Request, TypeFn};
    use std::sync::Arc;

    fn dummy(blocking: bool) -> TypeRef {
        Arc::new(TypeFn::new(blocking, |_o: FetchOptions, _r: Request| async {
            Fetched::default()
        }))
    }

    #[tokio::test]
    async fn test_register_and_lookup() {
        let reg = TypeRegistry::new();
        assert!(reg.lookup("catalog").await.is_none());

        assert!(reg.register("catalog", dummy(true)).await.is_none());
        assert!(reg.lookup("catalog").await.is_some());
    }

    #[tokio::test]
    async fn test_reregister_replaces() {
        let reg = TypeRegistry::new();
        reg.register("health", dummy(true)).await;
        let old = reg.register("health", dummy(false)).await;

        assert!(old.is_some_and(|t| t.supports_blocking()));
        assert!(reg
            .lookup("health")
            .await
            .is_some_and(|t| !t.supports_blocking()));
    }

    #[tokio::test]
    async fn test_names_sorted() {
        let mut reg = TypeRegistry::new();
        reg.insert_owned("b".into(), dummy(true));
        reg.insert_owned("a".into(), dummy(true));
        assert_eq!(reg.names().await, vec!["a".to_string(), "b".to_string()]);
    }
}
