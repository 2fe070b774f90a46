//! Background Tasks Module
//!
//! Contains tasks an owner may spawn alongside a cache.
//!
//! # Tasks
//! - Reclaim listener: evicts entries when the host signals memory pressure

mod reclaim;

pub use reclaim::{spawn_reclaim_listener, MemoryPressure, ReclaimSignal};
