//! Route cache collaborators.

use crate::RouteResult;
use std::collections::HashMap;
use std::sync::RwLock;

/// Opaque key-value store holding serialized route tables.
///
/// `get` and `put` must each be atomic under concurrent access: a reader
/// never observes a partially written entry. Eviction and TTL policy belong
/// to the implementation.
pub trait RouteCache: Send + Sync + 'static {
    /// Looks up a serialized table.
    fn get(&self, key: &str) -> RouteResult<Option<String>>;

    /// Stores a serialized table under the key.
    fn put(&self, key: &str, value: String) -> RouteResult<()>;
}

/// In-process cache backed by a read-write lock.
#[derive(Debug, Default)]
pub struct MemoryRouteCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryRouteCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |map| map.len())
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RouteCache for MemoryRouteCache {
    fn get(&self, key: &str) -> RouteResult<Option<String>> {
        Ok(self
            .entries
            .read()
            .ok()
            .and_then(|map| map.get(key).cloned()))
    }

    fn put(&self, key: &str, value: String) -> RouteResult<()> {
        if let Ok(mut map) = self.entries.write() {
            map.insert(key.to_string(), value);
        }
        Ok(())
    }
}
