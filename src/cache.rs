//! Bounded cache for resolved lookups
//!
//! Eviction is insertion-order FIFO: once the cache holds more than its
//! capacity, the oldest inserted key is dropped. Reads do not refresh an
//! entry's position.

use indexmap::IndexMap;
use tracing::trace;

/// FIFO cache keyed by normalized query
///
/// Entries sit in insertion order, so the front of the map is the oldest.
#[derive(Debug, Clone)]
pub struct ResultCache<V> {
    entries: IndexMap<String, V>,
    capacity: usize,
}

impl<V> ResultCache<V> {
    /// Create a cache holding at most `capacity` entries (at least one)
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Get cached result
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert result into cache, returning the evicted key if any
    ///
    /// Overwriting an existing key keeps its original insertion position.
    pub fn put(&mut self, key: String, value: V) -> Option<String> {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            return None;
        }

        self.entries.insert(key, value);

        if self.entries.len() > self.capacity {
            let (oldest, _) = self.entries.shift_remove_index(0)?;
            trace!(evicted = %oldest, "Result cache full, evicted oldest entry");
            return Some(oldest);
        }

        None
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            capacity: self.capacity,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of entries
    pub size: usize,

    /// Maximum capacity
    pub capacity: usize,
}

impl CacheStats {
    pub fn utilization(&self) -> f32 {
        if self.capacity == 0 {
            0.0
        } else {
            self.size as f32 / self.capacity as f32
        }
    }
}
