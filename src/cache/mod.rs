//! Cache Module
//!
//! Provides an in-memory cache bounded by item count and aggregate cost, with LRU eviction.

mod bounded;
mod entry;
mod lru;
mod stats;
mod store;
mod weigher;


// Re-export public types
pub use bounded::BoundedCache;
pub use entry::CacheEntry;
pub use lru::{LruTracker, NodeId};
pub use stats::CacheStats;
pub use store::{CacheStore, InsertOutcome};
pub use weigher::{FnWeigher, UnitWeigher, Weigher};
