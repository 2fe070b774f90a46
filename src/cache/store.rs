//! Cache Store Module
//!
//! Single-threaded cache engine combining HashMap storage with LRU tracking and cost accounting.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, info, warn};

use crate::cache::lru::NodeId;
use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::config::{CacheConfig, ReclaimStrategy};
use crate::error::Result;

// == Insert Outcome ==
/// What a write did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// The key already held a value that was replaced
    pub replaced: bool,
    /// Other entries evicted by the pass that followed the write
    pub evicted: usize,
}

impl InsertOutcome {
    /// True when the write created a new key.
    pub fn is_new(&self) -> bool {
        !self.replaced
    }
}

// == Cache Store ==
/// Cache storage bounded by item count and aggregate cost, with LRU eviction.
///
/// Not synchronized; [`BoundedCache`](crate::cache::BoundedCache) wraps it in a lock.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Activity statistics
    stats: CacheStats,
    /// Limits and reclaim behavior
    config: CacheConfig,
    /// Sum of all entry costs, wide enough that no run of `usize` costs overflows it
    total_cost: u128,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore, rejecting zero limits.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            config,
            total_cost: 0,
        })
    }

    // == Insert ==
    /// Stores a value under `key` with the given cost.
    ///
    /// An existing value is replaced and its cost recomputed. Either way the key
    /// becomes most recently used. If a limit is then exceeded, least recently
    /// used entries are evicted; the entry just written is never one of them.
    pub fn insert(&mut self, key: K, value: V, cost: usize) -> InsertOutcome {
        let (replaced, node) = match self.entries.get_mut(&key) {
            Some(entry) => {
                let (_, old_cost) = entry.replace(value, cost);
                self.total_cost = self.total_cost - old_cost as u128 + cost as u128;
                self.lru.touch(entry.node);
                (true, entry.node)
            }
            None => {
                let node = self.lru.push_front(key.clone());
                self.entries.insert(key, CacheEntry::new(value, cost, node));
                self.total_cost += cost as u128;
                (false, node)
            }
        };
        self.stats.record_write(replaced);

        if cost > self.config.max_cost_bytes {
            warn!(
                "Entry cost {} exceeds cost limit of {}; keeping it as the only survivor",
                cost, self.config.max_cost_bytes
            );
        }

        let evicted = self.evict_until(
            self.config.max_items,
            self.config.max_cost_bytes,
            Some(node),
        );
        self.sync_totals();

        InsertOutcome { replaced, evicted }
    }

    // == Get ==
    /// Retrieves a value by key and marks it as recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.get(key) {
            Some(entry) => {
                self.lru.touch(entry.node);
                self.stats.record_hit();
                Some(&entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Retrieves a value by key without touching recency or statistics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    // == Remove ==
    /// Removes an entry by key, returning its value.
    ///
    /// Removing an absent key is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.entries.remove(key)?;
        self.lru.remove(entry.node);
        self.total_cost -= entry.cost as u128;
        self.sync_totals();
        Some(entry.value)
    }

    // == Clear ==
    /// Removes every entry and resets the cost to zero.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.total_cost = 0;
        self.sync_totals();
    }

    // == Reclaim ==
    /// Gives memory back according to the configured strategy.
    ///
    /// Returns the number of entries removed.
    pub fn reclaim(&mut self) -> usize {
        let removed = match self.config.reclaim {
            ReclaimStrategy::TrimToLimits => {
                self.evict_until(self.config.max_items, self.config.max_cost_bytes, None)
            }
            ReclaimStrategy::Halve => self.evict_until(
                self.config.max_items / 2,
                self.config.max_cost_bytes / 2,
                None,
            ),
            ReclaimStrategy::Purge => {
                let count = self.entries.len();
                self.clear();
                self.stats.record_evictions(count);
                count
            }
        };
        self.stats.record_reclaim();
        self.sync_totals();

        info!(
            "Reclaim ({:?}): removed {} entries, {} remain",
            self.config.reclaim,
            removed,
            self.entries.len()
        );
        removed
    }

    // == Eviction Pass ==
    /// Evicts least recently used entries until both bounds hold.
    ///
    /// Stops early if only `protect` is left to evict.
    fn evict_until(&mut self, max_items: usize, max_cost: usize, protect: Option<NodeId>) -> usize {
        let mut evicted = 0;
        while self.entries.len() > max_items || self.total_cost > max_cost as u128 {
            let Some(oldest) = self.lru.oldest_id() else {
                break;
            };
            // The protected node sits at the head, so reaching it means nothing else is left.
            if Some(oldest) == protect {
                break;
            }
            if let Some(key) = self.lru.evict_oldest() {
                if let Some(entry) = self.entries.remove(&key) {
                    self.total_cost -= entry.cost as u128;
                }
                evicted += 1;
            }
        }

        if evicted > 0 {
            self.stats.record_evictions(evicted);
            debug!(
                "Eviction pass: evicted {} entries, {} remain with cost {}",
                evicted,
                self.entries.len(),
                self.total_cost
            );
        }
        evicted
    }

    fn sync_totals(&mut self) {
        self.stats.set_totals(self.entries.len(), self.total_cost());
    }

    /// Keys from least to most recently used.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.lru.iter_oldest_first().cloned().collect()
    }

    /// Recomputes the cost and tracker size from scratch and compares them to the running totals.
    #[cfg(test)]
    pub(crate) fn accounting_is_consistent(&self) -> bool {
        let summed: u128 = self.entries.values().map(|entry| entry.cost as u128).sum();
        summed == self.total_cost && self.lru.len() == self.entries.len()
    }
}

impl<K, V> CacheStore<K, V> {
    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the aggregate cost of all entries, saturating at `usize::MAX`.
    pub fn total_cost(&self) -> usize {
        usize::try_from(self.total_cost).unwrap_or(usize::MAX)
    }
}

impl<K, V> Default for CacheStore<K, V> {
    /// Empty store with the default limits, which always validate.
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            config: CacheConfig::default(),
            total_cost: 0,
        }
    }
}
