//! Memoization of per-function results.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::hir::FunctionKey;

use super::doc_types::ParameterTypes;

/// Documented parameter types, per function.
///
/// Entries live until [`clear`](Self::clear) or
/// [`invalidate`](Self::invalidate); drop the cache (or the tools owning it)
/// to reclaim memory.
#[derive(Debug, Default)]
pub struct ReflectionCache {
    parameter_types: RwLock<FxHashMap<FunctionKey, Arc<ParameterTypes>>>,
}

impl ReflectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, computing and storing it on a miss.
    ///
    /// A `None` key bypasses the cache entirely.
    pub fn parameter_types_or_insert_with(
        &self,
        key: Option<FunctionKey>,
        compute: impl FnOnce() -> ParameterTypes,
    ) -> Arc<ParameterTypes> {
        let Some(key) = key else {
            return Arc::new(compute());
        };

        if let Some(hit) = self.parameter_types.read().get(&key) {
            tracing::trace!(function = %key, "parameter types cache hit");
            return Arc::clone(hit);
        }

        let value = Arc::new(compute());
        Arc::clone(self.parameter_types.write().entry(key).or_insert(value))
    }

    pub fn get(&self, key: &FunctionKey) -> Option<Arc<ParameterTypes>> {
        self.parameter_types.read().get(key).cloned()
    }

    /// Drop the entry for one function; returns whether one existed.
    pub fn invalidate(&self, key: &FunctionKey) -> bool {
        let removed = self.parameter_types.write().remove(key).is_some();
        if removed {
            tracing::debug!(function = %key, "invalidated cached parameter types");
        }
        removed
    }

    pub fn clear(&self) {
        let mut entries = self.parameter_types.write();
        tracing::debug!(entries = entries.len(), "clearing reflection cache");
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.parameter_types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameter_types.read().is_empty()
    }
}
