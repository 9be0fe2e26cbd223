//! Cache Entry Module
//!
//! Defines the key/value pair stored in each recency list node.

use std::sync::Arc;

// == Cache Entry ==
/// A single cached key/value pair.
///
/// The value is held behind an `Arc` so lookups can hand out the stored
/// payload without cloning `V`. Replacing the value on `set` swaps the handle;
/// readers holding the previous handle keep the old payload alive.
#[derive(Debug)]
pub struct Entry<V> {
    /// The key this entry is indexed under
    pub key: String,
    /// The stored value
    pub value: Arc<V>,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates a new entry, taking ownership of `value`.
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value: Arc::new(value),
        }
    }

    // == Replace ==
    /// Swaps in a new value, returning the previous one.
    pub fn replace(&mut self, value: V) -> Arc<V> {
        std::mem::replace(&mut self.value, Arc::new(value))
    }

    // == Shared Value ==
    /// Returns a shared handle to the stored value.
    pub fn shared(&self) -> Arc<V> {
        Arc::clone(&self.value)
    }
}
