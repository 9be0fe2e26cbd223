//! Error types for the cache library
//!
//! Cache operations themselves are total: a missing key is a normal negative
//! result, never an error. Errors only surface when constructing a cache from
//! a strategy tag or when auditing internal invariants.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Strategy tag does not name an implemented eviction policy
    #[error("Unsupported strategy: {0}")]
    UnsupportedStrategy(String),

    /// Index and recency list disagree
    #[error("Invariant violated: {0}")]
    Invariant(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CacheError::UnsupportedStrategy("ARC".to_string());
        assert_eq!(err.to_string(), "Unsupported strategy: ARC");

        let err = CacheError::Invariant("index has 2 keys, list has 1".to_string());
        assert!(err.to_string().starts_with("Invariant violated"));
    }
}
