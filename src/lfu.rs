//! Least Frequently Used (LFU) Cache Implementation with Frequency Decay
//!
//! An LFU cache evicts the least frequently accessed entry when capacity is
//! reached. Entries are organized into frequency buckets: a map from access
//! count to the list of entries currently at that count.
//!
//! ## Data Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                              LFU Cache                              │
//! │                                                                     │
//! │  HashMap<K, *Node>              BTreeMap<u64, List>                 │
//! │  ┌──────────────┐              ┌─────────────────────────────────┐  │
//! │  │ "hot" ──────────────────────│ freq=10: [hot, warm]            │  │
//! │  │ "warm" ─────────────────────│ freq=5:  [item_a, item_b]       │  │
//! │  │ "cold" ─────────────────────│ freq=1:  [cold, new_item] ← LFU │  │
//! │  └──────────────┘              └─────────────────────────────────┘  │
//! │                                        ▲                            │
//! │                                   min_freq = 1                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Within a bucket, entries sit in promotion order: the entry at the front
//! has been at this frequency the longest and is the eviction victim. This
//! breaks frequency ties in favor of evicting the least recently promoted.
//!
//! ## The Cache Pollution Problem and Decay
//!
//! Pure LFU lets a key that was hot last week pin its slot forever: its
//! frequency never goes down. This engine keeps a running average
//! (`total_accesses / len`); when the average climbs above `max_avg_freq`,
//! every resident frequency is reduced by `max_avg_freq / 2` (floored at 1)
//! and the accounting is rebuilt. Relative order is roughly preserved, but
//! no entry can bank unbounded inertia.
//!
//! The decay pass is the only operation that is O(resident set); size
//! `max_avg_freq` so that it triggers rarely, or accept the occasional
//! longer critical section.
//!
//! # Thread Safety
//!
//! [`LfuCache`] guards its state with a single internal mutex and returns
//! clones from lookups, so it can be shared across threads behind an `Arc`.
//!
//! # Examples
//!
//! ```
//! use polycache::LfuCache;
//! use polycache::config::LfuCacheConfig;
//!
//! let cache = LfuCache::new(LfuCacheConfig::new(2));
//!
//! cache.put("rare", 1);
//! cache.put("popular", 2);
//! cache.get(&"popular");
//!
//! // "rare" has the lower frequency, so it is the one evicted
//! cache.put("new", 3);
//! assert_eq!(cache.get(&"rare"), None);
//! assert_eq!(cache.get(&"popular"), Some(2));
//! ```

extern crate alloc;

use crate::config::LfuCacheConfig;
use crate::entry::CacheEntry;
use crate::list::{List, ListEntry};
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
use crate::policy::CachePolicy;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use hashbrown::DefaultHashBuilder;
use hashbrown::HashMap;
use parking_lot::Mutex;

/// Internal LFU segment containing the actual cache algorithm.
///
/// Shared between [`LfuCache`] (behind a mutex) and nothing else at the
/// moment; the ARC engine's LFU half keeps its own bucket code because it
/// adds ghost bookkeeping and drops the decay machinery.
///
/// # Safety
///
/// This struct contains raw pointers in the `map` field. A pointer is valid
/// as long as the node it came from is still linked into one of the
/// frequency buckets. Node allocations are stable: moving a node between
/// buckets round-trips the same `Box` allocation, so map pointers survive
/// promotions and decay.
pub(crate) struct LfuSegment<K, V, S = DefaultHashBuilder> {
    /// Maximum number of resident entries.
    capacity: usize,
    /// Average-frequency ceiling that triggers decay.
    max_avg_freq: u64,
    /// Smallest frequency with a non-empty bucket; `None` when empty.
    min_freq: Option<u64>,
    /// Sum of accesses credited to resident entries.
    total_accesses: u64,
    /// `total_accesses / len`, integer division; 0 when empty.
    cur_avg: u64,
    /// Key to list node. The map is the authoritative set of live entries.
    map: HashMap<K, *mut ListEntry<CacheEntry<K, V>>, S>,
    /// Frequency to bucket of entries at that frequency, promotion order
    /// within the bucket. Only non-empty buckets are kept.
    freq_buckets: BTreeMap<u64, List<CacheEntry<K, V>>>,
    metrics: LfuCacheMetrics,
}

// SAFETY: LfuSegment owns all data and raw pointers point only to nodes
// owned by `freq_buckets`. Concurrent access is safe when wrapped in proper
// synchronization primitives.
unsafe impl<K: Send, V: Send, S: Send> Send for LfuSegment<K, V, S> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause
// data races.
unsafe impl<K: Send, V: Send, S: Sync> Sync for LfuSegment<K, V, S> {}

impl<K: Hash + Eq, V, S: BuildHasher> LfuSegment<K, V, S> {
    pub(crate) fn with_hasher(capacity: usize, max_avg_freq: u64, hash_builder: S) -> Self {
        LfuSegment {
            capacity,
            max_avg_freq: max_avg_freq.max(1),
            min_freq: None,
            total_accesses: 0,
            cur_avg: 0,
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            freq_buckets: BTreeMap::new(),
            metrics: LfuCacheMetrics::new(),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &LfuCacheMetrics {
        &self.metrics
    }

    #[cfg(test)]
    pub(crate) fn min_freq(&self) -> Option<u64> {
        self.min_freq
    }

    #[cfg(test)]
    pub(crate) fn total_accesses(&self) -> u64 {
        self.total_accesses
    }

    #[cfg(test)]
    pub(crate) fn frequency_of<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key).copied()?;
        // SAFETY: node comes from our map
        Some(unsafe { (*node).get_value().access_count })
    }

    /// Looks up a key, promoting its entry to the next frequency bucket on
    /// a hit.
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = match self.map.get(key).copied() {
            Some(node) => node,
            None => {
                self.metrics.core.record_miss();
                return None;
            }
        };

        // SAFETY: node comes from our map, so it is a live node in the
        // bucket matching its current access count
        unsafe { self.promote(node) };
        self.metrics.core.record_hit();
        self.metrics.record_frequency_increment();
        self.record_access();
        self.metrics.update_frequency_levels(&self.freq_buckets);

        // SAFETY: the node allocation is stable across bucket moves and a
        // possible decay pass, so the pointer still refers to this entry
        unsafe { Some(&(*node).get_value().value) }
    }

    /// Inserts a key-value pair.
    ///
    /// An existing key is overwritten and promoted exactly as a hit would
    /// be. A new key evicts from the `min_freq` bucket head if the segment
    /// is full, then enters bucket 1. Returns the replaced or evicted pair.
    /// A capacity of 0 makes this a no-op.
    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if self.capacity == 0 {
            return None;
        }

        if let Some(&node) = self.map.get(&key) {
            // SAFETY: node comes from our map
            let (old_key, old_value) = unsafe {
                let entry = (*node).get_value_mut();
                let old_key = mem::replace(&mut entry.key, key);
                let old_value = mem::replace(&mut entry.value, value);
                self.promote(node);
                (old_key, old_value)
            };
            self.metrics.record_frequency_increment();
            self.record_access();
            self.metrics.update_frequency_levels(&self.freq_buckets);
            return Some((old_key, old_value));
        }

        let evicted = if self.map.len() >= self.capacity {
            self.evict_least_frequent()
        } else {
            None
        };

        let bucket = self.freq_buckets.entry(1).or_insert_with(List::new);
        let node = bucket.push_back(CacheEntry::new(key.clone(), value));
        self.map.insert(key, node);
        self.min_freq = Some(1);
        self.metrics.core.record_insertion();
        self.record_access();
        self.metrics.update_frequency_levels(&self.freq_buckets);
        debug_assert!(self.map.len() <= self.capacity);

        evicted
    }

    /// Removes every entry and resets the access accounting.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.freq_buckets.clear();
        self.min_freq = None;
        self.total_accesses = 0;
        self.cur_avg = 0;
    }

    /// Moves a node from its current bucket to the next higher one.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this segment, linked into the bucket
    /// matching its current access count.
    unsafe fn promote(&mut self, node: *mut ListEntry<CacheEntry<K, V>>) {
        // SAFETY: caller guarantees node is live and initialized
        let old_freq = unsafe { (*node).get_value().access_count };
        let new_freq = old_freq + 1;

        let bucket = self
            .freq_buckets
            .get_mut(&old_freq)
            .expect("resident entry must have a bucket at its frequency");
        // SAFETY: node is linked into this bucket
        let boxed = unsafe { bucket.unlink(node) }.expect("node must be linked in its bucket");
        if bucket.is_empty() {
            self.freq_buckets.remove(&old_freq);
            if self.min_freq == Some(old_freq) {
                self.min_freq = Some(new_freq);
            }
        }

        // Round-trips the same allocation; map pointers stay valid
        let node = Box::into_raw(boxed);
        // SAFETY: node is detached and initialized
        unsafe { (*node).get_value_mut().access_count = new_freq };
        let bucket = self.freq_buckets.entry(new_freq).or_insert_with(List::new);
        // SAFETY: node is detached, so the new bucket may take ownership
        unsafe { bucket.attach_back_from_other_list(node) };
    }

    /// Evicts the head of the `min_freq` bucket, returning the evicted pair.
    fn evict_least_frequent(&mut self) -> Option<(K, V)> {
        let min_freq = self.min_freq?;
        let bucket = self.freq_buckets.get_mut(&min_freq)?;
        let node = bucket.pop_front()?;
        if bucket.is_empty() {
            self.freq_buckets.remove(&min_freq);
            self.min_freq = self.freq_buckets.keys().next().copied();
        }

        // SAFETY: pop_front yields a detached non-sigil node
        let entry = unsafe { node.take_value() };
        self.map.remove(&entry.key);
        self.metrics.core.record_eviction();

        // Keep the running average meaningful after the entry leaves
        self.total_accesses = self.total_accesses.saturating_sub(entry.access_count);
        self.refresh_average();

        Some((entry.key, entry.value))
    }

    /// Credits one access and fires decay when the average crosses the
    /// ceiling.
    fn record_access(&mut self) {
        self.total_accesses += 1;
        self.refresh_average();
        if self.cur_avg > self.max_avg_freq {
            self.decay();
        }
    }

    fn refresh_average(&mut self) {
        self.cur_avg = if self.map.is_empty() {
            0
        } else {
            self.total_accesses / self.map.len() as u64
        };
    }

    /// Reduces every resident frequency by `max_avg_freq / 2` (floored at
    /// 1), rebuilds the buckets, and re-derives `min_freq` and the access
    /// totals.
    fn decay(&mut self) {
        if self.map.is_empty() {
            return;
        }

        let step = self.max_avg_freq / 2;
        let mut new_total = 0u64;

        let nodes: Vec<*mut ListEntry<CacheEntry<K, V>>> = self.map.values().copied().collect();
        for node in nodes {
            unsafe {
                // SAFETY: every map value is a live node linked into the
                // bucket matching its current access count
                let old_freq = (*node).get_value().access_count;
                let new_freq = old_freq.saturating_sub(step).max(1);

                let bucket = self
                    .freq_buckets
                    .get_mut(&old_freq)
                    .expect("resident entry must have a bucket at its frequency");
                let boxed = bucket.unlink(node).expect("node must be linked in its bucket");
                if bucket.is_empty() {
                    self.freq_buckets.remove(&old_freq);
                }

                let node = Box::into_raw(boxed);
                (*node).get_value_mut().access_count = new_freq;
                self.freq_buckets
                    .entry(new_freq)
                    .or_insert_with(List::new)
                    .attach_back_from_other_list(node);

                new_total += new_freq;
            }
        }

        self.min_freq = self.freq_buckets.keys().next().copied();
        self.total_accesses = new_total;
        self.refresh_average();
        self.metrics.record_decay();
        self.metrics.update_frequency_levels(&self.freq_buckets);
        debug_assert_eq!(self.min_freq, self.freq_buckets.keys().next().copied());
    }
}

impl<K, V, S> core::fmt::Debug for LfuSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LfuSegment")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("min_freq", &self.min_freq)
            .field("total_accesses", &self.total_accesses)
            .field("cur_avg", &self.cur_avg)
            .finish()
    }
}

/// A thread-safe Least Frequently Used (LFU) cache with frequency decay.
///
/// Tracks an access frequency per entry and evicts the entry with the
/// lowest frequency when the cache is full; ties are broken against the
/// entry that has been at that frequency the longest. A running-average
/// ceiling (`max_avg_freq`, default 10) triggers a decay pass that halves
/// accumulated frequencies, so entries that were hot long ago cannot pin
/// the cache forever.
///
/// Every method takes `&self` and locks the engine's internal mutex for the
/// duration of the call; lookups return clones.
///
/// # Example
///
/// ```
/// use polycache::LfuCache;
/// use polycache::config::LfuCacheConfig;
///
/// let cache = LfuCache::new(LfuCacheConfig::new(3).with_max_avg_freq(100));
///
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.put("c", 3);
///
/// cache.get(&"a");
/// cache.get(&"a");
/// cache.get(&"b");
///
/// // "c" is the least frequently used
/// cache.put("d", 4);
/// assert_eq!(cache.get(&"c"), None);
/// assert_eq!(cache.get(&"a"), Some(1));
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    segment: Mutex<LfuSegment<K, V, S>>,
}

impl<K: Hash + Eq, V> LfuCache<K, V> {
    /// Creates a new LFU cache from a configuration.
    pub fn new(config: LfuCacheConfig) -> LfuCache<K, V, DefaultHashBuilder> {
        LfuCache::with_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LfuCache<K, V, S> {
    /// Creates a new LFU cache with a custom hash builder.
    pub fn with_hasher(config: LfuCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: Mutex::new(LfuSegment::with_hasher(
                config.capacity(),
                config.max_avg_freq(),
                hash_builder,
            )),
        }
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> usize {
        self.segment.lock().cap()
    }

    /// Returns the current number of entries in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.lock().len()
    }

    /// Returns `true` if the cache contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.lock().is_empty()
    }

    /// Retrieves a clone of the value for the given key.
    ///
    /// A hit increases the entry's frequency by one.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.segment.lock().get(key).cloned()
    }

    /// Looks up `key` and writes the value into `value` on a hit.
    ///
    /// Returns `true` on a hit; `value` is left untouched on a miss.
    #[inline]
    pub fn get_into<Q>(&self, key: &Q, value: &mut V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        let mut segment = self.segment.lock();
        match segment.get(key) {
            Some(v) => {
                *value = v.clone();
                true
            }
            None => false,
        }
    }

    /// Inserts a key-value pair.
    ///
    /// Overwriting an existing key promotes it exactly as a hit would.
    /// Inserting a new key into a full cache evicts the least frequently
    /// used entry first (oldest within the lowest bucket); the displaced
    /// pair is returned. With a capacity of 0 this is a no-op.
    #[inline]
    pub fn put(&self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        self.segment.lock().put(key, value)
    }

    /// Removes all entries and resets the frequency accounting.
    #[inline]
    pub fn clear(&self) {
        self.segment.lock().clear()
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> CachePolicy<K, V> for LfuCache<K, V, S> {
    fn put(&self, key: K, value: V) {
        LfuCache::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        LfuCache::get(self, key)
    }

    fn get_into(&self, key: &K, value: &mut V) -> bool {
        LfuCache::get_into(self, key, value)
    }

    fn len(&self) -> usize {
        LfuCache::len(self)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.lock().metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}
