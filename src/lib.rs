//! Lithium - A fixed-capacity in-process key/value cache
//!
//! Caches are built from a strategy tag and a capacity and used through the
//! [`Cache`] trait. Least-recently-used eviction is the only strategy today.
//!
//! ```
//! use lithium::Cache;
//!
//! let cache = lithium::new::<u32>("LRU", 2).expect("LRU is supported");
//! cache.set("user:1", 1);
//! cache.set("user:2", 2);
//! cache.set("order:1", 3);
//!
//! assert!(cache.get("user:1").is_none());
//! assert_eq!(cache.invalidate_containing("user"), 1);
//! assert_eq!(cache.stats().occupancy(), (1, 2));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod strategy;

use tracing::warn;

pub use cache::{Cache, CacheStats, LruCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use strategy::Strategy;

/// Builds a cache for the given strategy tag.
///
/// Fails with [`CacheError::UnsupportedStrategy`] if the tag names no
/// implemented strategy.
pub fn try_new<V>(tag: &str, capacity: usize) -> Result<Box<dyn Cache<V>>>
where
    V: Send + Sync + 'static,
{
    let strategy: Strategy = tag.parse()?;
    Ok(strategy.build(capacity))
}

/// Builds a cache for the given strategy tag, or `None` if the tag is unknown.
pub fn new<V>(tag: &str, capacity: usize) -> Option<Box<dyn Cache<V>>>
where
    V: Send + Sync + 'static,
{
    match try_new(tag, capacity) {
        Ok(cache) => Some(cache),
        Err(err) => {
            warn!(tag, %err, "No cache constructed");
            None
        }
    }
}
