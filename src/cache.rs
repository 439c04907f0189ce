//! Caching utilities for bot detection.

use crate::error::{Error, Result};
use lru::LruCache;
use parking_lot::Mutex;
use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;

/// Largest capacity a cache may be created with.
///
/// The underlying map is preallocated to its full capacity.
pub const MAX_CACHE_CAPACITY: usize = 1 << 20;

/// Fixed-capacity LRU cache shared between request handlers.
///
/// Every operation goes through one mutex, so `get` can refresh recency.
pub struct DetectionCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    inner: Mutex<LruCache<K, V>>,
    name: String,
}

impl<K, V> DetectionCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    /// Create a new cache holding at most `max_capacity` entries.
    pub fn new(name: impl Into<String>, max_capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_capacity)
            .filter(|c| c.get() <= MAX_CACHE_CAPACITY)
            .ok_or(Error::InvalidCacheSize(max_capacity))?;

        Ok(Self {
            inner: Mutex::new(LruCache::new(capacity)),
            name: name.into(),
        })
    }

    /// Get a value from the cache, marking it as most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Insert a value, replacing and refreshing an existing entry.
    ///
    /// Evicts the least recently used entry when the cache is full.
    pub fn insert(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    /// Check for a key without touching its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    /// Get the current entry count.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }

    /// Get the cache name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invalidate all entries.
    pub fn invalidate_all(&self) {
        self.inner.lock().clear();
    }
}

impl<K, V> std::fmt::Debug for DetectionCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionCache")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_basic() {
        let cache: DetectionCache<String, i32> = DetectionCache::new("test", 100).unwrap();

        cache.insert("key1".to_string(), 42);

        assert_eq!(cache.get("key1"), Some(42));
        assert_eq!(cache.get("missing"), None);
        assert_eq!(cache.name(), "test");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result: Result<DetectionCache<String, bool>> = DetectionCache::new("test", 0);
        assert!(matches!(result, Err(Error::InvalidCacheSize(0))));

        let result: Result<DetectionCache<String, bool>> =
            DetectionCache::new("test", MAX_CACHE_CAPACITY + 1);
        assert!(matches!(result, Err(Error::InvalidCacheSize(_))));
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache: DetectionCache<String, bool> = DetectionCache::new("test", 2).unwrap();

        cache.insert("a".to_string(), true);
        cache.insert("b".to_string(), false);

        // Touch "a" so "b" becomes the eviction candidate
        assert_eq!(cache.get("a"), Some(true));

        cache.insert("c".to_string(), true);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_reinsert_updates_and_refreshes() {
        let cache: DetectionCache<String, bool> = DetectionCache::new("test", 2).unwrap();

        cache.insert("a".to_string(), true);
        cache.insert("b".to_string(), true);
        cache.insert("a".to_string(), false);

        assert_eq!(cache.len(), 2);

        cache.insert("c".to_string(), true);

        assert_eq!(cache.get("a"), Some(false));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let cache: DetectionCache<String, bool> = DetectionCache::new("test", 8).unwrap();

        for i in 0..100 {
            cache.insert(format!("ua-{i}"), i % 2 == 0);
            assert!(cache.len() <= 8);
        }

        assert_eq!(cache.len(), 8);
        assert_eq!(cache.capacity(), 8);
        // Only the most recent eight survive
        assert!(cache.contains("ua-99"));
        assert!(cache.contains("ua-92"));
        assert!(!cache.contains("ua-91"));
    }

    #[test]
    fn test_invalidate_all() {
        let cache: DetectionCache<String, bool> = DetectionCache::new("test", 4).unwrap();
        cache.insert("a".to_string(), true);
        cache.invalidate_all();
        assert!(cache.is_empty());
    }
}
