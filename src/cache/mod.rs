//! Cache Module
//!
//! The [`Cache`] contract plus its LRU implementation.

mod entry;
mod list;
mod lru;
mod stats;
mod store;


use std::sync::Arc;

// Re-export public types
pub use entry::Entry;
pub use list::{RecencyList, SlotId};
pub use lru::LruCache;
pub use stats::CacheStats;
pub use store::LruStore;

// == Cache Contract ==
/// Capability interface every eviction strategy implements.
///
/// Implementations are safe to share between threads and are object safe, so
/// callers can hold a `Box<dyn Cache<V>>` without knowing the strategy. No
/// operation fails: an absent key is an ordinary `None` or `false`.
pub trait Cache<V>: Send + Sync {
    /// Returns the value stored under `key` and marks it most recently used.
    ///
    /// The returned `Arc` shares the stored payload; it is never cloned.
    fn get(&self, key: &str) -> Option<Arc<V>>;

    /// Stores `value` under `key`, replacing and promoting an existing entry.
    ///
    /// Inserting a new key into a full cache evicts exactly one entry.
    fn set(&self, key: &str, value: V);

    /// Removes `key`. Returns false if it was not present.
    fn invalidate(&self, key: &str) -> bool;

    /// Removes every entry whose key starts with `pattern`.
    ///
    /// Only prefixes match: `"user"` removes `"user:1"` but not `"admin_user"`.
    /// Returns how many entries were removed.
    fn invalidate_containing(&self, pattern: &str) -> usize;

    /// Current size, capacity and counters. Does not affect recency order.
    fn stats(&self) -> CacheStats;

    /// Current number of entries.
    fn len(&self) -> usize {
        self.stats().size
    }

    /// Configured maximum number of entries.
    fn capacity(&self) -> usize {
        self.stats().capacity
    }

    /// Returns true if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks for `key` without promoting it.
    fn contains(&self, key: &str) -> bool;
}
