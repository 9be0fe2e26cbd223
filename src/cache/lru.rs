//! LRU Cache Module
//!
//! Thread-safe LRU cache: an [`LruStore`] behind a single mutex.
//!
//! Every public operation takes the lock exactly once and then works on the
//! store directly. The lock is not reentrant, so no operation calls back into
//! another locking method while holding the guard.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{Cache, CacheStats, LruStore};
use crate::error::Result;

// == LRU Cache ==
/// Fixed-capacity least-recently-used cache, safe to share across threads.
///
/// All operations, reads included, are serialized: `get` mutates recency
/// order, so there is no shared read path.
///
/// # Example
/// ```
/// use lithium::{Cache, LruCache};
///
/// let cache = LruCache::new(2);
/// cache.set("a", 1);
/// cache.set("b", 2);
/// cache.get("a");
/// cache.set("c", 3);
///
/// assert!(cache.contains("a"));
/// assert!(!cache.contains("b"));
/// ```
#[derive(Debug)]
pub struct LruCache<V> {
    inner: Mutex<LruStore<V>>,
}

impl<V> LruCache<V> {
    // == Constructor ==
    /// Creates a new cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LruStore::new(capacity)),
        }
    }

    /// Reads a value without promoting it or touching the hit/miss counters.
    pub fn peek(&self, key: &str) -> Option<Arc<V>> {
        self.inner.lock().peek(key)
    }

    /// Snapshot of keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .lock()
            .keys_by_recency()
            .map(str::to_owned)
            .collect()
    }

    /// Verifies index/list consistency under the lock.
    pub fn check_invariants(&self) -> Result<()> {
        self.inner.lock().check_invariants()
    }
}

impl<V: Send + Sync> Cache<V> for LruCache<V> {
    fn get(&self, key: &str) -> Option<Arc<V>> {
        self.inner.lock().get(key)
    }

    // Displaced entries are bound outside the guard so that `Drop for V`
    // never runs with the lock held.
    fn set(&self, key: &str, value: V) {
        let displaced = self.inner.lock().set(key, value);
        drop(displaced);
    }

    fn invalidate(&self, key: &str) -> bool {
        let removed = self.inner.lock().invalidate(key);
        removed.is_some()
    }

    fn invalidate_containing(&self, pattern: &str) -> usize {
        let removed = self.inner.lock().invalidate_prefix(pattern);
        removed.len()
    }

    fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    fn len(&self) -> usize {
        self.inner.lock().len()
    }

    fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }
}
