//! Thread-safe bounded cache.
//!
//! [`BoundedCache`] puts a [`CacheStore`] behind a single `parking_lot::Mutex`.
//! Reads move keys in the recency list, so every operation takes the lock
//! exclusively. Every method takes `&self`; share a cache across threads with `Arc`.
//!
//! # Example
//! ```
//! use bounded_cache::{BoundedCache, CacheConfig};
//!
//! let cache = BoundedCache::from_config(CacheConfig::new().with_max_items(2)).unwrap();
//! assert!(cache.add_item("a", 1));
//! assert!(cache.add_item("b", 2));
//! assert!(cache.add_item("c", 3)); // evicts "a"
//!
//! assert_eq!(cache.remove_item("a"), None);
//! assert_eq!(cache.remove_item("b"), Some(2));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore, InsertOutcome, UnitWeigher, Weigher};
use crate::config::CacheConfig;
use crate::error::Result;

// == Bounded Cache ==
/// A key/value cache bounded by item count and aggregate cost.
pub struct BoundedCache<K, V> {
    inner: Mutex<CacheStore<K, V>>,
    weigher: Box<dyn Weigher<K, V>>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Clone + 'static,
    V: 'static,
{
    // == Constructors ==
    /// Creates a cache with the default limits (125 items, 25 MiB).
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CacheStore::default()),
            weigher: Box::new(UnitWeigher),
        }
    }

    /// Creates a cache holding at most `max_items` entries, with the default cost limit.
    pub fn with_max_items(max_items: usize) -> Result<Self> {
        Self::from_config(CacheConfig::new().with_max_items(max_items))
    }

    /// Creates a cache with a cost limit of `capacity_mb` MiB, with the default count limit.
    pub fn with_max_cost_mb(capacity_mb: usize) -> Result<Self> {
        Self::from_config(CacheConfig::new().with_max_cost_mb(capacity_mb)?)
    }

    /// Creates a cache from a full configuration. Every entry costs one unit.
    pub fn from_config(config: CacheConfig) -> Result<Self> {
        Self::with_weigher(config, UnitWeigher)
    }

    /// Creates a cost-aware cache that weighs each value when it is written.
    pub fn with_weigher(config: CacheConfig, weigher: impl Weigher<K, V>) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(CacheStore::new(config)?),
            weigher: Box::new(weigher),
        })
    }

    // == Add Item ==
    /// Stores `item` under `key`.
    ///
    /// Returns `true` if the key was new and `false` if an existing value was
    /// replaced. The item is always stored. Other entries may be evicted to
    /// make room, and the return value does not report that.
    pub fn add_item(&self, key: K, item: V) -> bool {
        self.insert(key, item).is_new()
    }

    /// Like [`add_item`](Self::add_item) with an explicit cost instead of the weigher's.
    pub fn add_item_with_cost(&self, key: K, item: V, cost: usize) -> bool {
        self.insert_with_cost(key, item, cost).is_new()
    }

    /// Stores `item` under `key` and reports whether it replaced a value and how many entries were evicted.
    pub fn insert(&self, key: K, item: V) -> InsertOutcome {
        let cost = self.weigher.weigh(&key, &item);
        self.insert_with_cost(key, item, cost)
    }

    pub fn insert_with_cost(&self, key: K, item: V, cost: usize) -> InsertOutcome {
        self.inner.lock().insert(key, item, cost)
    }

    // == Remove Item ==
    /// Removes the entry for `key` and hands its value back.
    ///
    /// Returns `None` if the key is absent.
    pub fn remove_item<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    // == Clear ==
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    // == Reclaim ==
    /// Handles a request from the host to use less memory.
    ///
    /// Safe to call from any thread at any time. Returns the number of entries removed.
    pub fn reclaim(&self) -> usize {
        self.inner.lock().reclaim()
    }

    // == Reads ==
    /// Returns a clone of the value for `key` and marks the key as recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Returns a clone of the value for `key` without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Aggregate cost of all entries.
    pub fn total_cost(&self) -> usize {
        self.inner.lock().total_cost()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn config(&self) -> CacheConfig {
        self.inner.lock().config().clone()
    }

    /// Keys from least to most recently used.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.inner.lock().keys_by_recency()
    }
}

impl<K, V> Default for BoundedCache<K, V>
where
    K: Hash + Eq + Clone + 'static,
    V: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.inner.lock();
        f.debug_struct("BoundedCache")
            .field("len", &store.len())
            .field("total_cost", &store.total_cost())
            .field("config", store.config())
            .finish()
    }
}
