//! Hash-Sharded Cache Wrapper
//!
//! Fronts any [`CachePolicy`] engine with a fixed fan-out of independent
//! instances to reduce lock contention:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        ShardedCache (N shards)                   │
//! │                                                                  │
//! │  hash(key) % N ──▶ shard selection                               │
//! │                                                                  │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐     ┌──────────┐         │
//! │  │ Shard 0  │ │ Shard 1  │ │ Shard 2  │ ... │ Shard N-1│         │
//! │  │ [engine] │ │ [engine] │ │ [engine] │     │ [engine] │         │
//! │  └──────────┘ └──────────┘ └──────────┘     └──────────┘         │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every engine in this crate carries its own mutex, so the wrapper adds
//! no locking of its own: routing a call to a shard *is* the lock
//! striping. There is no coordination across shards, which also means no
//! global ordering; each shard's eviction decisions see only its own
//! slice of the key space.
//!
//! # Examples
//!
//! ```
//! use polycache::{CachePolicy, LruCache, ShardedCache};
//! use polycache::config::{LruCacheConfig, ShardedCacheConfig};
//!
//! // 4 LRU shards, 16 entries total (4 per shard)
//! let cache = ShardedCache::new(ShardedCacheConfig::new(16, 4), |shard_cap| {
//!     LruCache::new(LruCacheConfig::new(shard_cap))
//! });
//!
//! cache.put("key".to_string(), 42);
//! assert_eq!(cache.get(&"key".to_string()), Some(42));
//! ```

extern crate alloc;

use crate::metrics::CacheMetrics;
use crate::policy::CachePolicy;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use hashbrown::DefaultHashBuilder;

use crate::config::ShardedCacheConfig;

/// A cache wrapper that routes operations across `N` independent engines
/// by key hash.
///
/// Construction takes an engine **factory**: the wrapper calls it once per
/// shard with the per-shard capacity (`ceil(total_capacity / N)`), so any
/// engine type, or even a hand-rolled [`CachePolicy`] implementation, can
/// be sharded. A shard count of 0 in the config resolves to the machine's
/// available parallelism.
///
/// The wrapper itself holds no locks; per-shard locking lives inside the
/// engines. Readers and writers observe each shard independently, so
/// there is no ordering guarantee across shards.
///
/// # Example
///
/// ```
/// use polycache::{CachePolicy, LfuCache, ShardedCache};
/// use polycache::config::{LfuCacheConfig, ShardedCacheConfig};
///
/// let cache = ShardedCache::new(ShardedCacheConfig::new(64, 0), |cap| {
///     LfuCache::new(LfuCacheConfig::new(cap))
/// });
///
/// cache.put(1u64, "one");
/// assert_eq!(cache.get(&1u64), Some("one"));
/// ```
pub struct ShardedCache<P, S = DefaultHashBuilder> {
    shards: Box<[P]>,
    hash_builder: S,
}

impl<P> ShardedCache<P, DefaultHashBuilder> {
    /// Creates a sharded cache, building each shard with `factory`.
    ///
    /// The factory receives the per-shard capacity.
    pub fn new<F>(config: ShardedCacheConfig, factory: F) -> Self
    where
        F: FnMut(usize) -> P,
    {
        Self::with_hasher(config, factory, DefaultHashBuilder::default())
    }
}

impl<P, S: BuildHasher> ShardedCache<P, S> {
    /// Creates a sharded cache with a custom hash builder for routing.
    ///
    /// The routing hasher is independent of whatever hasher the shard
    /// engines use internally.
    pub fn with_hasher<F>(config: ShardedCacheConfig, mut factory: F, hash_builder: S) -> Self
    where
        F: FnMut(usize) -> P,
    {
        let shard_capacity = config.shard_capacity();
        let shards: Vec<P> = (0..config.shards()).map(|_| factory(shard_capacity)).collect();
        debug_assert!(!shards.is_empty());

        Self {
            shards: shards.into_boxed_slice(),
            hash_builder,
        }
    }

    /// Returns the number of shards.
    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Returns the shard responsible for `key`.
    #[inline]
    fn shard_for<Q>(&self, key: &Q) -> &P
    where
        Q: ?Sized + Hash,
    {
        let idx = (self.hash_builder.hash_one(key) as usize) % self.shards.len();
        &self.shards[idx]
    }
}

impl<K, V, P, S> CachePolicy<K, V> for ShardedCache<P, S>
where
    K: Hash + Eq,
    P: CachePolicy<K, V>,
    S: BuildHasher,
{
    fn put(&self, key: K, value: V) {
        self.shard_for(&key).put(key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        self.shard_for(key).get(key)
    }

    fn get_into(&self, key: &K, value: &mut V) -> bool {
        self.shard_for(key).get_into(key, value)
    }

    /// Total resident count across all shards.
    ///
    /// Shards are sampled one at a time, so under concurrent writes the
    /// sum may be slightly stale.
    fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.len()).sum()
    }
}

impl<P: CacheMetrics, S> CacheMetrics for ShardedCache<P, S> {
    /// Sums each metric across shards, then recomputes the `*_rate` keys
    /// from the summed counters.
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut summed = BTreeMap::new();
        for shard in self.shards.iter() {
            for (key, value) in shard.metrics() {
                *summed.entry(key).or_insert(0.0) += value;
            }
        }

        let requests = summed.get("requests").copied().unwrap_or(0.0);
        let hits = summed.get("cache_hits").copied().unwrap_or(0.0);
        let evictions = summed.get("evictions").copied().unwrap_or(0.0);
        if requests > 0.0 {
            summed.insert("hit_rate".into(), hits / requests);
            summed.insert("miss_rate".into(), (requests - hits) / requests);
            summed.insert("eviction_rate".into(), evictions / requests);
        } else {
            summed.insert("hit_rate".into(), 0.0);
            summed.insert("miss_rate".into(), 0.0);
        }

        summed
    }

    fn algorithm_name(&self) -> &'static str {
        "Sharded"
    }
}

impl<P, S> core::fmt::Debug for ShardedCache<P, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShardedCache")
            .field("shards", &self.shards.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArcCacheConfig, LfuCacheConfig, LruCacheConfig};
    use crate::{ArcCache, LfuCache, LruCache};

    fn make_lru_shards(total: usize, shards: usize) -> ShardedCache<LruCache<u64, u64>> {
        ShardedCache::new(ShardedCacheConfig::new(total, shards), |cap| {
            LruCache::new(LruCacheConfig::new(cap))
        })
    }

    #[test]
    fn test_sharded_put_get_roundtrip() {
        let cache = make_lru_shards(16, 4);
        for i in 0..16u64 {
            cache.put(i, i * 10);
        }
        let mut hits = 0;
        for i in 0..16u64 {
            if let Some(v) = cache.get(&i) {
                assert_eq!(v, i * 10);
                hits += 1;
            }
        }
        // Hash skew can evict within a shard, but most keys must survive
        assert!(hits >= 8);
        assert!(cache.len() <= 16);
    }

    #[test]
    fn test_sharded_total_capacity_bound() {
        let cache = make_lru_shards(16, 4);
        for i in 0..10_000u64 {
            cache.put(i, i);
        }
        assert!(cache.len() <= 16);
    }

    #[test]
    fn test_sharded_shard_count_resolution() {
        let cache = make_lru_shards(64, 8);
        assert_eq!(cache.shard_count(), 8);

        // 0 resolves to available parallelism
        let cache = make_lru_shards(64, 0);
        assert!(cache.shard_count() >= 1);
    }

    #[test]
    fn test_sharded_routing_is_stable() {
        let cache = make_lru_shards(64, 8);
        cache.put(7, 70);
        // Same key must land on the same shard every time
        for _ in 0..10 {
            assert_eq!(cache.get(&7), Some(70));
        }
    }

    #[test]
    fn test_sharded_get_into() {
        let cache = make_lru_shards(16, 4);
        cache.put(3, 30);

        let mut out = 0;
        assert!(cache.get_into(&3, &mut out));
        assert_eq!(out, 30);
        assert!(!cache.get_into(&99, &mut out));
        assert_eq!(out, 30);
    }

    #[test]
    fn test_sharded_over_lfu_engine() {
        let cache = ShardedCache::new(ShardedCacheConfig::new(8, 2), |cap| {
            LfuCache::new(LfuCacheConfig::new(cap))
        });
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.get(&"b"), Some(2));
    }

    #[test]
    fn test_sharded_over_arc_engine() {
        let cache = ShardedCache::new(ShardedCacheConfig::new(16, 4), |cap| {
            ArcCache::new(ArcCacheConfig::new(cap, 2))
        });
        cache.put(1u32, "one");
        assert_eq!(cache.get(&1u32), Some("one"));
    }

    #[test]
    fn test_sharded_metrics_aggregation() {
        let cache = make_lru_shards(16, 4);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.get(&1);
        cache.get(&999);

        let metrics = cache.metrics();
        assert_eq!(metrics.get("requests").unwrap(), &2.0);
        assert_eq!(metrics.get("cache_hits").unwrap(), &1.0);
        assert_eq!(metrics.get("insertions").unwrap(), &2.0);
        assert!((metrics.get("hit_rate").unwrap() - 0.5).abs() < 1e-9);
        assert_eq!(cache.algorithm_name(), "Sharded");
    }

    #[test]
    fn test_sharded_zero_total_capacity() {
        let cache = make_lru_shards(0, 4);
        cache.put(1, 1);
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.len(), 0);
    }
}
