//! Cache Statistics Module
//!
//! Tracks cache activity: hits, misses, inserts, overwrites, evictions and reclaims.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found)
    pub misses: u64,
    /// Number of writes that created a new key
    pub inserts: u64,
    /// Number of writes that replaced an existing key
    pub overwrites: u64,
    /// Number of entries evicted by the LRU policy, including reclaims
    pub evictions: u64,
    /// Number of reclamation signals handled
    pub reclaims: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Current aggregate cost of the entries
    pub total_cost: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Write ==
    /// Counts a write as either a new key or an overwrite.
    pub fn record_write(&mut self, replaced: bool) {
        if replaced {
            self.overwrites += 1;
        } else {
            self.inserts += 1;
        }
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub fn record_reclaim(&mut self) {
        self.reclaims += 1;
    }

    // == Update Gauges ==
    /// Updates the entry count and cost gauges.
    pub fn set_totals(&mut self, entries: usize, cost: usize) {
        self.total_entries = entries;
        self.total_cost = cost;
    }
}
