//! Memory Reclaim Task
//!
//! Delivers host memory-pressure notifications to a cache.
//!
//! The owner creates a [`MemoryPressure`] broadcaster and hands receivers to
//! the caches that should react to it. There is no global notification center.

use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::BoundedCache;

/// Buffered signals per receiver before older ones are dropped.
const PRESSURE_CHANNEL_CAPACITY: usize = 16;

// == Reclaim Signal ==
/// A request from the host to reduce memory usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReclaimSignal;

// == Memory Pressure ==
/// Broadcasts reclamation signals to every subscribed cache.
#[derive(Debug, Clone)]
pub struct MemoryPressure {
    sender: broadcast::Sender<ReclaimSignal>,
}

impl MemoryPressure {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(PRESSURE_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Returns a receiver for future signals.
    pub fn subscribe(&self) -> broadcast::Receiver<ReclaimSignal> {
        self.sender.subscribe()
    }

    // == Notify ==
    /// Sends a reclamation signal.
    ///
    /// Returns the number of subscribers that will see it, 0 if none are listening.
    pub fn notify(&self) -> usize {
        self.sender.send(ReclaimSignal).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for MemoryPressure {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns a task that reclaims memory from `cache` each time a signal arrives.
///
/// Signals missed because the receiver lagged behind are folded into a single
/// reclaim. The task ends when every [`MemoryPressure`] sender is dropped;
/// the returned handle can also be aborted.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(BoundedCache::<String, Vec<u8>>::new());
/// let pressure = MemoryPressure::new();
/// let handle = spawn_reclaim_listener(cache.clone(), pressure.subscribe());
/// pressure.notify();
/// ```
pub fn spawn_reclaim_listener<K, V>(
    cache: Arc<BoundedCache<K, V>>,
    mut signals: broadcast::Receiver<ReclaimSignal>,
) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Send + 'static,
{
    tokio::spawn(async move {
        info!("Starting reclaim listener");

        loop {
            match signals.recv().await {
                Ok(ReclaimSignal) => {
                    let removed = cache.reclaim();
                    debug!("Reclaim signal handled: removed {} entries", removed);
                }
                Err(RecvError::Lagged(skipped)) => {
                    let removed = cache.reclaim();
                    debug!(
                        "Reclaim listener lagged by {} signals: removed {} entries",
                        skipped, removed
                    );
                }
                Err(RecvError::Closed) => {
                    info!("Memory pressure channel closed, stopping reclaim listener");
                    break;
                }
            }
        }
    })
}
