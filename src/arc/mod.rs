//! Adaptive Replacement Cache (ARC) Implementation
//!
//! ARC splits its capacity between two pools and lets the workload decide
//! the split:
//!
//! - an **LRU half** holding entries whose access count has not yet crossed
//!   the transform threshold `T`, ordered by recency;
//! - an **LFU half** holding entries that crossed `T`, organized into
//!   frequency buckets (without the standalone LFU engine's decay).
//!
//! Each half keeps a **ghost list**: a bounded FIFO of keys it recently
//! evicted. A `put` of a key found in a ghost list is a near-miss: the
//! half that just lost that key would have hit if it had been one unit
//! bigger. The coordinator reacts by shifting one unit of capacity toward
//! that half:
//!
//! ```text
//!           ghost hit (LRU half)              ghost hit (LFU half)
//!   workload is recency-biased         workload is frequency-biased
//!        lru_capacity += 1                   lfu_capacity += 1
//!        lfu_capacity -= 1                   lru_capacity -= 1
//! ```
//!
//! The sum `lru_capacity + lfu_capacity` stays equal to the configured
//! total across every adaptation; a half at 0 holds no residents but keeps
//! consulting its ghosts, so it can win capacity back.
//!
//! Entries enter through the LRU half; on their `T`-th access the
//! coordinator transfers them to the LFU half at frequency `T`. A transfer
//! into a full LFU half brings one unit of capacity along from the LRU
//! half (which just gave up the resident), so graduation never loses an
//! entry; frequency-heavy working sets migrate wholesale and recency-heavy
//! workloads win the capacity back through LRU ghost hits.
//!
//! # Thread Safety
//!
//! Both halves share one internal mutex, so ghost checks and capacity
//! adjustments are atomic with the insert or evict they accompany.
//!
//! # Examples
//!
//! ```
//! use polycache::ArcCache;
//! use polycache::config::ArcCacheConfig;
//!
//! let cache = ArcCache::new(ArcCacheConfig::new(4, 2));
//!
//! cache.put("a", 1);
//! assert_eq!(cache.get(&"a"), Some(1)); // second access crosses T = 2
//!
//! // "a" now lives in the frequency half and survives recency pressure
//! cache.put("b", 2);
//! cache.put("c", 3);
//! cache.put("d", 4);
//! cache.put("e", 5);
//! assert_eq!(cache.get(&"a"), Some(1));
//! ```

mod ghost;
mod lfu_part;
mod lru_part;

extern crate alloc;

use crate::config::ArcCacheConfig;
use crate::metrics::{ArcCacheMetrics, CacheMetrics};
use crate::policy::CachePolicy;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::hash::{BuildHasher, Hash};
use hashbrown::DefaultHashBuilder;
use parking_lot::Mutex;
use self::lfu_part::ArcLfuPart;
use self::lru_part::ArcLruPart;

/// Internal ARC state: the two halves and the coordinator bookkeeping,
/// owned together so one lock covers every ghost check and capacity shift.
pub(crate) struct ArcSegment<K, V, S = DefaultHashBuilder> {
    /// Configured total resident capacity (the halves always sum to this).
    capacity: usize,
    /// Access count at which entries graduate to the LFU half.
    transform_threshold: u64,
    lru_part: ArcLruPart<K, V, S>,
    lfu_part: ArcLfuPart<K, V, S>,
    metrics: ArcCacheMetrics,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> ArcSegment<K, V, S> {
    /// Creates a segment with the whole capacity on the LRU side.
    ///
    /// Ghost capacities are fixed at the total capacity: a half squeezed
    /// to zero residents must still remember evictions, or it could never
    /// produce the ghost hit that wins its capacity back.
    pub(crate) fn with_hasher(config: ArcCacheConfig, hash_builder: S) -> Self {
        let capacity = config.capacity();
        let threshold = config.transform_threshold();
        ArcSegment {
            capacity,
            transform_threshold: threshold,
            lru_part: ArcLruPart::with_hasher(capacity, capacity, threshold, hash_builder.clone()),
            lfu_part: ArcLfuPart::with_hasher(0, capacity, hash_builder),
            metrics: ArcCacheMetrics::new(capacity as u64, 0),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn lru_capacity(&self) -> usize {
        self.lru_part.capacity()
    }

    #[inline]
    pub(crate) fn lfu_capacity(&self) -> usize {
        self.lfu_part.capacity()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.lru_part.len() + self.lfu_part.len()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &ArcCacheMetrics {
        &self.metrics
    }

    /// Looks up a key in the LRU half first, then the LFU half.
    pub(crate) fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        if let Some((value, reached_threshold)) = self.lru_part.get(key) {
            if reached_threshold {
                self.transfer_to_lfu(key);
            }
            self.metrics.core.record_hit();
            return Some(value);
        }

        if let Some(value) = self.lfu_part.get(key) {
            self.metrics.core.record_hit();
            return Some(value);
        }

        self.metrics.core.record_miss();
        None
    }

    /// Inserts a key-value pair, adapting the capacity split on ghost hits.
    pub(crate) fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        // Resident in a half: update in place with that half's hit logic
        if self.lru_part.contains(&key) {
            if self.lru_part.update(&key, value) == Some(true) {
                self.transfer_to_lfu(&key);
            }
            return;
        }
        let value = match self.lfu_part.update(&key, value) {
            None => return,
            Some(value) => value,
        };

        if self.lru_part.remove_ghost(&key) {
            // Recency-biased workload: grow the LRU half
            self.metrics.record_lru_ghost_hit();
            if self.lfu_part.capacity() > 0 {
                self.metrics.core.evictions += self.lfu_part.decrease_capacity() as u64;
                self.lru_part.increase_capacity();
            }
            if self.lru_part.insert(key, value).is_some() {
                self.metrics.core.record_eviction();
            }
        } else if self.lfu_part.remove_ghost(&key) {
            // Frequency-biased workload: grow the LFU half
            self.metrics.record_lfu_ghost_hit();
            if self.lru_part.capacity() > 0 {
                self.metrics.core.evictions += self.lru_part.decrease_capacity() as u64;
                self.lfu_part.increase_capacity();
            }
            if self.lfu_part.insert(key, value).is_some() {
                self.metrics.core.record_eviction();
            }
        } else if self.lru_part.insert(key, value).is_some() {
            self.metrics.core.record_eviction();
        }

        self.metrics.core.record_insertion();
        self.metrics.update_capacities(
            self.lru_part.capacity() as u64,
            self.lfu_part.capacity() as u64,
        );
        debug_assert_eq!(
            self.lru_part.capacity() + self.lfu_part.capacity(),
            self.capacity
        );
    }

    /// Moves an entry that crossed the threshold into the LFU half at
    /// frequency exactly `T`.
    ///
    /// A transfer into a full LFU half carries one unit of capacity with
    /// it: the LRU half just gave up a resident, so it can always spare
    /// the unit, and a warm working set migrates between halves without
    /// ever losing an entry. Ghost hits remain the only other way the
    /// split moves.
    fn transfer_to_lfu(&mut self, key: &K) {
        if let Some(mut entry) = self.lru_part.take(key) {
            entry.access_count = self.transform_threshold;
            if self.lfu_part.len() >= self.lfu_part.capacity() && self.lru_part.capacity() > 0 {
                self.metrics.core.evictions += self.lru_part.decrease_capacity() as u64;
                self.lfu_part.increase_capacity();
            }
            if self.lfu_part.insert_entry(entry).is_some() {
                self.metrics.core.record_eviction();
            }
            self.metrics.record_transfer();
            self.metrics.update_capacities(
                self.lru_part.capacity() as u64,
                self.lfu_part.capacity() as u64,
            );
            debug_assert_eq!(
                self.lru_part.capacity() + self.lfu_part.capacity(),
                self.capacity
            );
        }
    }

    /// Removes all residents and ghosts; the learned capacity split is kept.
    pub(crate) fn clear(&mut self) {
        self.lru_part.clear();
        self.lfu_part.clear();
    }

    #[cfg(test)]
    fn ghost_lens(&self) -> (usize, usize) {
        (self.lru_part.ghost_len(), self.lfu_part.ghost_len())
    }
}

impl<K, V, S> core::fmt::Debug for ArcSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArcSegment")
            .field("capacity", &self.capacity)
            .field("transform_threshold", &self.transform_threshold)
            .field("lru_part", &self.lru_part)
            .field("lfu_part", &self.lfu_part)
            .finish()
    }
}

/// A thread-safe Adaptive Replacement Cache.
///
/// Balances recency against frequency by splitting capacity between an LRU
/// pool and an LFU pool, steering the split with ghost-list hits. Workloads
/// that re-touch recently evicted keys grow the LRU side; workloads that
/// keep coming back to frequent keys grow the LFU side. Either side may
/// shrink to zero residents while still consulting its ghosts.
///
/// Every method takes `&self` and locks the engine's internal mutex for the
/// duration of the call; lookups return clones.
///
/// # Example
///
/// ```
/// use polycache::ArcCache;
/// use polycache::config::ArcCacheConfig;
///
/// let cache = ArcCache::new(ArcCacheConfig::new(8, 2));
/// cache.put("k", 1);
/// assert_eq!(cache.get(&"k"), Some(1));
/// assert_eq!(cache.lru_capacity() + cache.lfu_capacity(), 8);
/// ```
#[derive(Debug)]
pub struct ArcCache<K, V, S = DefaultHashBuilder> {
    segment: Mutex<ArcSegment<K, V, S>>,
}

impl<K: Hash + Eq + Clone, V> ArcCache<K, V> {
    /// Creates a new ARC cache from a configuration.
    pub fn new(config: ArcCacheConfig) -> ArcCache<K, V, DefaultHashBuilder> {
        ArcCache::with_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> ArcCache<K, V, S> {
    /// Creates a new ARC cache with a custom hash builder.
    pub fn with_hasher(config: ArcCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: Mutex::new(ArcSegment::with_hasher(config, hash_builder)),
        }
    }

    /// Returns the configured total resident capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.segment.lock().capacity()
    }

    /// Returns the current resident capacity of the LRU half.
    #[inline]
    pub fn lru_capacity(&self) -> usize {
        self.segment.lock().lru_capacity()
    }

    /// Returns the current resident capacity of the LFU half.
    #[inline]
    pub fn lfu_capacity(&self) -> usize {
        self.segment.lock().lfu_capacity()
    }

    /// Returns the number of resident entries across both halves.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.lock().len()
    }

    /// Returns `true` if neither half holds a resident entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieves a clone of the value for the given key.
    ///
    /// A hit in the LRU half bumps the entry's count and may graduate it
    /// to the LFU half; a hit in the LFU half promotes its frequency.
    #[inline]
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.segment.lock().get(key)
    }

    /// Looks up `key` and writes the value into `value` on a hit.
    ///
    /// Returns `true` on a hit; `value` is left untouched on a miss.
    #[inline]
    pub fn get_into(&self, key: &K, value: &mut V) -> bool
    where
        V: Clone,
    {
        match self.segment.lock().get(key) {
            Some(v) => {
                *value = v;
                true
            }
            None => false,
        }
    }

    /// Inserts a key-value pair.
    ///
    /// Updates residents in place; otherwise consults both ghost lists,
    /// shifts one unit of capacity toward the half whose ghost matched,
    /// and installs the entry there (the LRU half when neither matched).
    /// With a total capacity of 0 this is a no-op.
    #[inline]
    pub fn put(&self, key: K, value: V) {
        self.segment.lock().put(key, value)
    }

    /// Removes all residents and ghosts; the adapted capacity split is
    /// kept.
    #[inline]
    pub fn clear(&self) {
        self.segment.lock().clear()
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher + Clone> CachePolicy<K, V>
    for ArcCache<K, V, S>
{
    fn put(&self, key: K, value: V) {
        ArcCache::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        ArcCache::get(self, key)
    }

    fn get_into(&self, key: &K, value: &mut V) -> bool {
        ArcCache::get_into(self, key, value)
    }

    fn len(&self) -> usize {
        ArcCache::len(self)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> CacheMetrics for ArcCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.lock().metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "ARC"
    }
}
