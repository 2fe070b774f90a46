//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with cost accounting.

use crate::cache::lru::NodeId;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Weight counted toward the cost limit
    pub cost: usize,
    /// Position in the recency list
    pub(crate) node: NodeId,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    pub(crate) fn new(value: V, cost: usize, node: NodeId) -> Self {
        Self { value, cost, node }
    }

    // == Replace ==
    /// Swaps in a new value and cost, returning the old value and cost.
    pub(crate) fn replace(&mut self, value: V, cost: usize) -> (V, usize) {
        let old_value = std::mem::replace(&mut self.value, value);
        let old_cost = std::mem::replace(&mut self.cost, cost);
        (old_value, old_cost)
    }
}
