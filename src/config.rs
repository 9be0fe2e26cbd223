//! Configuration Module
//!
//! Declarative cache settings that hosts can embed in their own config files.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::Cache;
use crate::error::Result;
use crate::strategy::Strategy;

/// Default maximum number of entries.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Cache construction parameters.
///
/// Missing fields fall back to their defaults when deserialized. The strategy
/// is kept as a raw tag so that an unknown name surfaces as
/// [`CacheError::UnsupportedStrategy`](crate::CacheError::UnsupportedStrategy)
/// from [`build`](Self::build) rather than as a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Eviction strategy tag, e.g. `"LRU"`
    pub strategy: String,
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
}

impl CacheConfig {
    // == Constructor ==
    /// Creates a config for the given strategy tag and capacity.
    pub fn new(strategy: impl Into<String>, capacity: usize) -> Self {
        Self {
            strategy: strategy.into(),
            capacity,
        }
    }

    /// Parses the configured strategy tag.
    pub fn strategy(&self) -> Result<Strategy> {
        self.strategy.parse()
    }

    // == Build ==
    /// Constructs the configured cache.
    pub fn build<V>(&self) -> Result<Box<dyn Cache<V>>>
    where
        V: Send + Sync + 'static,
    {
        let strategy = self.strategy()?;
        info!(%strategy, capacity = self.capacity, "Cache initialized");
        Ok(strategy.build(self.capacity))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default().to_string(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.strategy, "LRU");
        assert_eq!(config.capacity, 1000);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: CacheConfig = serde_json::from_str(r#"{"capacity": 16}"#).unwrap();
        assert_eq!(config.strategy, "LRU");
        assert_eq!(config.capacity, 16);

        let config: CacheConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_config_build() {
        let cache = CacheConfig::new("lru", 2).build::<String>().unwrap();

        cache.set("k", "v".to_string());
        assert_eq!(cache.get("k").as_deref().map(String::as_str), Some("v"));
        assert_eq!(cache.capacity(), 2);
    }

    #[test]
    fn test_config_build_unsupported() {
        let result = CacheConfig::new("FIFO", 10).build::<u8>();
        assert!(matches!(result, Err(CacheError::UnsupportedStrategy(tag)) if tag == "FIFO"));
    }
}
