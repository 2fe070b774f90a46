//! Integration Tests for Concurrent Access
//!
//! Exercises a shared cache from many threads at once.

use std::sync::{Arc, Barrier};
use std::thread;

use bounded_cache::{BoundedCache, CacheConfig};

// == Helper Functions ==

fn spawn_workers<F>(threads: usize, work: F) -> Vec<thread::JoinHandle<()>>
where
    F: Fn(usize) + Send + Sync + 'static,
{
    let work = Arc::new(work);
    let barrier = Arc::new(Barrier::new(threads));
    (0..threads)
        .map(|t| {
            let work = Arc::clone(&work);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                work(t);
            })
        })
        .collect()
}

fn join_all(handles: Vec<thread::JoinHandle<()>>) {
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
}

// == Tests ==

#[test]
fn test_concurrent_distinct_inserts_are_all_kept() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 100;
    const COST: usize = 3;

    let config = CacheConfig::new()
        .with_max_items(THREADS * PER_THREAD)
        .with_max_cost_bytes(THREADS * PER_THREAD * COST);
    let cache = Arc::new(BoundedCache::from_config(config).unwrap());

    let shared = Arc::clone(&cache);
    join_all(spawn_workers(THREADS, move |t| {
        for i in 0..PER_THREAD {
            let key = format!("key_{}_{}", t, i);
            assert!(shared.add_item_with_cost(key, i, COST));
        }
    }));

    assert_eq!(cache.len(), THREADS * PER_THREAD);
    assert_eq!(cache.total_cost(), THREADS * PER_THREAD * COST);
    for t in 0..THREADS {
        for i in 0..PER_THREAD {
            assert_eq!(cache.peek(format!("key_{}_{}", t, i).as_str()), Some(i));
        }
    }

    let stats = cache.stats();
    assert_eq!(stats.inserts, (THREADS * PER_THREAD) as u64);
    assert_eq!(stats.evictions, 0);
}

#[test]
fn test_concurrent_inserts_respect_count_limit() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 200;
    const LIMIT: usize = 50;

    let cache = Arc::new(BoundedCache::with_max_items(LIMIT).unwrap());

    let shared = Arc::clone(&cache);
    join_all(spawn_workers(THREADS, move |t| {
        for i in 0..PER_THREAD {
            shared.add_item((t, i), vec![0u8; 8]);
            assert!(shared.len() <= LIMIT);
        }
    }));

    assert_eq!(cache.len(), LIMIT);
    assert_eq!(cache.total_cost(), LIMIT);
    assert_eq!(
        cache.stats().evictions,
        (THREADS * PER_THREAD - LIMIT) as u64
    );
}

#[test]
fn test_same_key_writers_leave_consistent_state() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 500;

    let cache: Arc<BoundedCache<&'static str, usize>> = Arc::new(BoundedCache::new());

    let shared = Arc::clone(&cache);
    join_all(spawn_workers(THREADS, move |t| {
        for i in 0..ROUNDS {
            // Cost tracks the value so a torn update would show up in total_cost
            let value = t * ROUNDS + i + 1;
            shared.add_item_with_cost("shared", value, value);
            if i % 7 == 0 {
                shared.remove_item("shared");
            }
        }
    }));

    match cache.peek("shared") {
        Some(value) => assert_eq!(cache.total_cost(), value),
        None => assert_eq!(cache.total_cost(), 0),
    }
    assert!(cache.len() <= 1);
}

#[test]
fn test_mixed_operations_keep_accounting_consistent() {
    const THREADS: usize = 6;
    const ROUNDS: usize = 400;

    let config = CacheConfig::new()
        .with_max_items(32)
        .with_max_cost_bytes(256);
    let cache: Arc<BoundedCache<u32, u32>> = Arc::new(BoundedCache::from_config(config).unwrap());

    let shared = Arc::clone(&cache);
    join_all(spawn_workers(THREADS, move |t| {
        for i in 0..ROUNDS as u32 {
            let key = (i * 31 + t as u32) % 64;
            match i % 10 {
                0 if t == 0 => shared.clear(),
                1 if t == 1 => {
                    shared.reclaim();
                }
                2 | 3 => {
                    shared.remove_item(&key);
                }
                4 | 5 => {
                    shared.get(&key);
                }
                _ => {
                    shared.add_item_with_cost(key, i, (key % 16) as usize);
                }
            }
        }
    }));

    // Quiescent: recompute the cost from what is left
    let keys = cache.keys_by_recency();
    assert_eq!(keys.len(), cache.len());
    let summed: usize = keys.iter().map(|key| (key % 16) as usize).sum();
    assert_eq!(cache.total_cost(), summed);
    assert!(cache.len() <= 32);
    assert!(cache.total_cost() <= 256);
}
