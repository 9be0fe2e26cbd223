//! Cache Statistics Module
//!
//! Tracks occupancy plus hit, miss, eviction and invalidation counters.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of a cache.
///
/// `size` and `capacity` are always exact at the moment the snapshot was
/// taken; the counters are cumulative since construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Current number of entries in the cache
    pub size: usize,
    /// Configured maximum number of entries
    pub capacity: usize,
    /// Number of `get` calls that found their key
    pub hits: u64,
    /// Number of `get` calls that did not
    pub misses: u64,
    /// Number of entries removed to stay within capacity
    pub evictions: u64,
    /// Number of entries removed by `invalidate` or `invalidate_containing`
    pub invalidations: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats for the given capacity with all counters at zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Returns the `(size, capacity)` pair.
    pub fn occupancy(&self) -> (usize, usize) {
        (self.size, self.capacity)
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Invalidations ==
    /// Adds `count` explicitly removed entries to the invalidation counter.
    pub fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    // == Update Entry Count ==
    /// Updates the current entry count.
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }
}
