//! Process-wide, string-keyed service registry.
//!
//! Modules publish capabilities at startup; hosts look them up by key.
//! A lookup never fails loudly: a missing key or a type mismatch is an
//! empty result, and callers decide how to fall back.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

type Service = Arc<dyn Any + Send + Sync>;

/// Keyed service lookup.
#[derive(Default)]
pub struct ModuleRegistry {
    services: RwLock<HashMap<String, Service>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by the whole process.
    pub fn global() -> &'static ModuleRegistry {
        static GLOBAL: OnceLock<ModuleRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ModuleRegistry::new)
    }

    /// Publish `service` under `key`, replacing any previous entry.
    ///
    /// To register a trait object, register the `Arc<dyn Trait>` itself and
    /// resolve with the same type.
    pub fn register<T>(&self, key: impl Into<String>, service: T)
    where
        T: Any + Send + Sync,
    {
        let key = key.into();
        let previous = self.services.write().insert(key.clone(), Arc::new(service));
        if previous.is_some() {
            tracing::debug!(key = %key, "Registry: service replaced");
        } else {
            tracing::info!(key = %key, "Registry: service registered");
        }
    }

    /// Look up `key` as a `T`.
    pub fn resolve<T>(&self, key: &str) -> Option<T>
    where
        T: Any + Send + Sync + Clone,
    {
        let service = self.services.read().get(key).cloned()?;
        let resolved = service.downcast_ref::<T>().cloned();
        if resolved.is_none() {
            tracing::debug!(key = %key, "Registry: service has a different type");
        }
        resolved
    }

    pub fn contains(&self, key: &str) -> bool {
        self.services.read().contains_key(key)
    }

    /// Remove `key`. Returns whether it was present.
    pub fn unregister(&self, key: &str) -> bool {
        self.services.write().remove(key).is_some()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.services.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}
