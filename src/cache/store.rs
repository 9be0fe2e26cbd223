//! Cache Store Module
//!
//! Main LRU engine combining a HashMap key index with the recency list.
//!
//! `LruStore` is not synchronized; every method takes `&self` or `&mut self`
//! and never locks. [`LruCache`](crate::cache::LruCache) wraps it in a mutex
//! and calls these methods from inside a single critical section, so they
//! can freely call each other.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::cache::{CacheStats, Entry, RecencyList, SlotId};
use crate::error::{CacheError, Result};

/// Upper bound on slots reserved up front, so huge capacities do not allocate eagerly.
const PREALLOCATE_LIMIT: usize = 1024;

// == LRU Store ==
/// Fixed-capacity LRU storage.
///
/// Holds the invariant `index.len() == order.len() <= capacity` between calls.
#[derive(Debug)]
pub struct LruStore<V> {
    /// Key -> node handle in `order`
    index: HashMap<String, SlotId>,
    /// Entries ordered most to least recently used
    order: RecencyList<V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<V> LruStore<V> {
    // == Constructor ==
    /// Creates a new LruStore holding at most `capacity` entries.
    ///
    /// A capacity of zero is allowed: every insert is evicted immediately.
    pub fn new(capacity: usize) -> Self {
        let reserve = capacity.min(PREALLOCATE_LIMIT);
        Self {
            index: HashMap::with_capacity(reserve),
            order: RecencyList::with_capacity(reserve),
            stats: CacheStats::new(capacity),
            capacity,
        }
    }

    // == Get ==
    /// Retrieves a value by key, promoting it to most recently used.
    pub fn get(&mut self, key: &str) -> Option<Arc<V>> {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        self.order.touch(id);
        self.stats.record_hit();
        self.order.get(id).map(Entry::shared)
    }

    // == Peek ==
    /// Retrieves a value by key without touching recency or counters.
    pub fn peek(&self, key: &str) -> Option<Arc<V>> {
        self.index
            .get(key)
            .and_then(|&id| self.order.get(id))
            .map(Entry::shared)
    }

    // == Contains ==
    /// Checks for `key` without promoting it.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// If the key already exists its value is replaced and the entry is
    /// promoted. Otherwise the entry is inserted at the head, and if that puts
    /// the store over capacity the least recently used entry is evicted.
    ///
    /// Returns whatever the call displaced: the previous value under `key`, or
    /// the evicted entry. Callers holding a lock drop it after unlocking.
    pub fn set(&mut self, key: &str, value: V) -> Option<Entry<V>> {
        if let Some(&id) = self.index.get(key) {
            let previous = self.order.get_mut(id).map(|entry| Entry {
                key: key.to_string(),
                value: entry.replace(value),
            });
            self.order.touch(id);
            return previous;
        }

        let id = self.order.push_front(Entry::new(key, value));
        self.index.insert(key.to_string(), id);

        if self.order.len() > self.capacity {
            return self.evict_oldest();
        }
        None
    }

    // == Invalidate ==
    /// Removes an entry by key, returning it. None if the key was absent.
    #[must_use = "removed entries should be dropped outside any lock"]
    pub fn invalidate(&mut self, key: &str) -> Option<Entry<V>> {
        let entry = self.remove_entry(key)?;
        trace!(key, "Invalidated entry");
        self.stats.record_invalidations(1);
        Some(entry)
    }

    // == Invalidate Prefix ==
    /// Removes every entry whose key starts with `prefix` and returns them.
    ///
    /// Matching keys are collected before any removal so the index is not
    /// mutated while it is being walked. Surviving entries keep their
    /// relative order.
    #[must_use = "removed entries should be dropped outside any lock"]
    pub fn invalidate_prefix(&mut self, prefix: &str) -> Vec<Entry<V>> {
        let matching: Vec<String> = self
            .index
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();

        let removed: Vec<Entry<V>> = matching
            .iter()
            .filter_map(|key| self.remove_entry(key))
            .collect();

        if !removed.is_empty() {
            debug!(prefix, removed = removed.len(), "Invalidated entries by prefix");
        }

        self.stats.record_invalidations(removed.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.order.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|entry| entry.key.as_str())
    }

    // == Check Invariants ==
    /// Verifies that the index and the recency list describe the same entries.
    ///
    /// Checks size agreement, the capacity bound, that every indexed key
    /// resolves to a node holding that key, and that walking the list visits
    /// exactly `len` distinct keys.
    pub fn check_invariants(&self) -> Result<()> {
        if self.index.len() != self.order.len() {
            return Err(CacheError::Invariant(format!(
                "index has {} keys, recency list has {} entries",
                self.index.len(),
                self.order.len()
            )));
        }

        if self.order.len() > self.capacity {
            return Err(CacheError::Invariant(format!(
                "{} entries exceed capacity {}",
                self.order.len(),
                self.capacity
            )));
        }

        for (key, &id) in &self.index {
            match self.order.get(id) {
                Some(entry) if entry.key == *key => {}
                Some(entry) => {
                    return Err(CacheError::Invariant(format!(
                        "key {key:?} points at node holding {:?}",
                        entry.key
                    )))
                }
                None => {
                    return Err(CacheError::Invariant(format!(
                        "key {key:?} points at an empty slot"
                    )))
                }
            }
        }

        let mut seen = HashSet::with_capacity(self.order.len());
        for entry in self.order.iter().take(self.order.len() + 1) {
            if !seen.insert(entry.key.as_str()) {
                return Err(CacheError::Invariant(format!(
                    "key {:?} linked more than once",
                    entry.key
                )));
            }
        }
        if seen.len() != self.order.len() {
            return Err(CacheError::Invariant(format!(
                "walked {} entries, expected {}",
                seen.len(),
                self.order.len()
            )));
        }

        Ok(())
    }

    // == Internal Primitives ==
    /// Unlinks `key` from both the index and the list.
    fn remove_entry(&mut self, key: &str) -> Option<Entry<V>> {
        let id = self.index.remove(key)?;
        self.order.remove(id)
    }

    /// Drops the tail entry. A no-op on an empty store.
    fn evict_oldest(&mut self) -> Option<Entry<V>> {
        let entry = self.order.evict_oldest()?;
        self.index.remove(&entry.key);
        self.stats.record_eviction();
        debug!(key = %entry.key, capacity = self.capacity, "Evicted least recently used entry");
        Some(entry)
    }
}
