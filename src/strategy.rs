//! Eviction Strategy Module
//!
//! Strategy tags and the factory that turns a tag plus a capacity into a
//! [`Cache`] implementation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::{Cache, LruCache};
use crate::error::CacheError;

// == Strategy ==
/// Eviction policy selected when a cache is constructed.
///
/// Tags parse case-insensitively from strings such as `"LRU"` and serialize
/// in upper case. Deserialization goes through [`FromStr`], so both accept
/// the same spellings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[non_exhaustive]
pub enum Strategy {
    /// Least recently used
    #[default]
    #[serde(rename = "LRU")]
    Lru,
}

impl Strategy {
    /// Canonical tag for this strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Lru => "LRU",
        }
    }

    // == Build ==
    /// Constructs a cache using this strategy.
    ///
    /// A capacity of zero yields a cache that evicts every insert.
    pub fn build<V>(self, capacity: usize) -> Box<dyn Cache<V>>
    where
        V: Send + Sync + 'static,
    {
        match self {
            Strategy::Lru => Box::new(LruCache::new(capacity)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.eq_ignore_ascii_case("lru") {
            Ok(Strategy::Lru)
        } else {
            Err(CacheError::UnsupportedStrategy(tag.to_string()))
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = CacheError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}
