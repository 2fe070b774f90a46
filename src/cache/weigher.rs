//! Entry weigher, assigns a cost to each cached entry.
//!
//! Without a weigher every entry costs one unit, so the cost limit behaves
//! like a second count limit. A weigher lets the cache bound bytes instead.

/// Computes the cost of a cache entry.
pub trait Weigher<K, V>: Send + Sync + 'static {
    fn weigh(&self, key: &K, value: &V) -> usize;
}

/// Every entry costs exactly 1 unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitWeigher;

impl<K, V> Weigher<K, V> for UnitWeigher {
    #[inline]
    fn weigh(&self, _key: &K, _value: &V) -> usize {
        1
    }
}

/// A weigher backed by a closure.
pub struct FnWeigher<F>(pub F);

impl<K, V, F> Weigher<K, V> for FnWeigher<F>
where
    F: Fn(&K, &V) -> usize + Send + Sync + 'static,
{
    #[inline]
    fn weigh(&self, key: &K, value: &V) -> usize {
        (self.0)(key, value)
    }
}
