//! Bounded Cache - A generic, thread-safe in-memory cache
//!
//! Holds values under an item count limit and an aggregate cost limit, evicting
//! least recently used entries when either is exceeded or the host signals
//! memory pressure.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{BoundedCache, CacheStats, FnWeigher, InsertOutcome, UnitWeigher, Weigher};
pub use config::{CacheConfig, ReclaimStrategy};
pub use error::{CacheError, Result};
pub use tasks::{spawn_reclaim_listener, MemoryPressure, ReclaimSignal};
