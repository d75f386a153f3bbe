//! LRU-K Cache Implementation
//!
//! LRU-K fronts a main LRU cache with an **admission history**: a second,
//! LRU-bounded map from key to sighting count. A key is only installed in
//! the main cache once it has been sighted K times, which keeps
//! single-sighting keys (scans, one-off lookups) from polluting the main
//! cache.
//!
//! ```text
//! put(k, v) ──▶ sightings[k] += 1 ──▶ < K ? ──▶ dropped (history only)
//!                                      ≥ K ──▶ installed in main LRU
//! ```
//!
//! The history being LRU-bounded guarantees that admission state stays
//! O(history capacity): keys that stop being sighted age out of the
//! history just like cache entries age out of the main cache.
//!
//! # Thread Safety
//!
//! The main cache and the history share one internal mutex, so every
//! operation observes and updates both atomically.
//!
//! # Examples
//!
//! ```
//! use polycache::LruKCache;
//! use polycache::config::LruKCacheConfig;
//!
//! // Admit after 2 sightings
//! let cache = LruKCache::new(LruKCacheConfig::new(10, 40, 2));
//!
//! cache.put("a", 1);               // first sighting: history only
//! assert_eq!(cache.get(&"a"), None); // counts as a sighting too
//! cache.put("a", 1);               // threshold cleared: admitted
//! assert_eq!(cache.get(&"a"), Some(1));
//! ```

extern crate alloc;

use crate::config::LruKCacheConfig;
use crate::lru::LruSegment;
use crate::metrics::{CacheMetrics, LruKCacheMetrics};
use crate::policy::CachePolicy;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::hash::{BuildHasher, Hash};
use hashbrown::DefaultHashBuilder;
use parking_lot::Mutex;

/// Internal LRU-K state: the main cache and the admission history, owned
/// together so one lock covers both.
pub(crate) struct LruKSegment<K, V, S = DefaultHashBuilder> {
    /// Sightings required before a key enters the main cache.
    k: u64,
    /// The main LRU cache holding admitted entries.
    main: LruSegment<K, V, S>,
    /// Admission history: key to sighting count, LRU-bounded.
    history: LruSegment<K, u64, S>,
    metrics: LruKCacheMetrics,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> LruKSegment<K, V, S> {
    pub(crate) fn with_hasher(config: LruKCacheConfig, hash_builder: S) -> Self {
        LruKSegment {
            k: config.k(),
            main: LruSegment::with_hasher(config.capacity(), hash_builder.clone()),
            history: LruSegment::with_hasher(config.history_capacity(), hash_builder),
            metrics: LruKCacheMetrics::new(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.main.len()
    }

    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.main.cap()
    }

    #[inline]
    pub(crate) fn history_len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &LruKCacheMetrics {
        &self.metrics
    }

    /// Records a sighting for `key` and returns what the main cache holds.
    ///
    /// A lookup counts toward admission even when it misses: the next `put`
    /// of a key that keeps getting asked for will clear the gate sooner.
    pub(crate) fn get(&mut self, key: &K) -> Option<&V> {
        let sightings = self.history.get(key).copied().unwrap_or(0) + 1;
        self.history.put(key.clone(), sightings);

        let hit = self.main.get(key);
        if hit.is_some() {
            self.metrics.core.record_hit();
        } else {
            self.metrics.core.record_miss();
        }
        hit
    }

    /// Inserts `key` if it is resident or has cleared the admission gate.
    ///
    /// Resident keys are overwritten in place. Absent keys get a sighting
    /// credited; once the count reaches K the key leaves the history and
    /// enters the main cache, possibly evicting its LRU entry.
    pub(crate) fn put(&mut self, key: K, value: V) {
        if self.main.contains(&key) {
            self.main.put(key, value);
            return;
        }

        let sightings = self.history.get(&key).copied().unwrap_or(0) + 1;
        if sightings >= self.k {
            self.history.remove(&key);
            if self.main.put(key, value).is_some() {
                // Key was absent, so a returned pair is an eviction
                self.metrics.core.record_eviction();
            }
            self.metrics.core.record_insertion();
            self.metrics.record_admission();
        } else {
            self.history.put(key, sightings);
            self.metrics.record_deferred_put();
        }
    }

    pub(crate) fn clear(&mut self) {
        self.main.clear();
        self.history.clear();
    }
}

impl<K, V, S> core::fmt::Debug for LruKSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruKSegment")
            .field("k", &self.k)
            .field("len", &self.main.len())
            .field("history_len", &self.history.len())
            .finish()
    }
}

/// A thread-safe LRU cache with K-sighting admission.
///
/// Wraps a main [`LruCache`](crate::LruCache)-style cache of capacity `C`
/// with an admission history of capacity `H`. Keys must be sighted `K`
/// times (via `get` or `put`) before they are admitted; below the
/// threshold, `put` only records the sighting.
///
/// Note that `get` can keep missing while a key is still being admitted
/// even though `put` was called for it. That is the point of the policy:
/// the main cache only pays for keys that have proven themselves.
///
/// # Example
///
/// ```
/// use polycache::LruKCache;
/// use polycache::config::LruKCacheConfig;
///
/// let cache = LruKCache::new(LruKCacheConfig::new(100, 400, 3));
///
/// for _ in 0..2 {
///     cache.put("warm", 7);
/// }
/// assert_eq!(cache.get(&"warm"), None); // two sightings, K = 3
///
/// cache.put("warm", 7);
/// assert_eq!(cache.get(&"warm"), Some(7));
/// ```
#[derive(Debug)]
pub struct LruKCache<K, V, S = DefaultHashBuilder> {
    segment: Mutex<LruKSegment<K, V, S>>,
}

impl<K: Hash + Eq + Clone, V> LruKCache<K, V> {
    /// Creates a new LRU-K cache from a configuration.
    pub fn new(config: LruKCacheConfig) -> LruKCache<K, V, DefaultHashBuilder> {
        LruKCache::with_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> LruKCache<K, V, S> {
    /// Creates a new LRU-K cache with a custom hash builder.
    pub fn with_hasher(config: LruKCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: Mutex::new(LruKSegment::with_hasher(config, hash_builder)),
        }
    }

    /// Returns the number of entries resident in the main cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.lock().len()
    }

    /// Returns `true` if the main cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the main cache capacity.
    #[inline]
    pub fn cap(&self) -> usize {
        self.segment.lock().cap()
    }

    /// Returns the number of keys currently tracked by the admission history.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.segment.lock().history_len()
    }

    /// Records a sighting for `key` and returns a clone of the main-cache
    /// value if the key has been admitted.
    #[inline]
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.segment.lock().get(key).cloned()
    }

    /// Looks up `key` and writes the value into `value` on a hit.
    ///
    /// Returns `true` on a hit; `value` is left untouched on a miss. The
    /// sighting is recorded either way.
    #[inline]
    pub fn get_into(&self, key: &K, value: &mut V) -> bool
    where
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

    /// Inserts a key-value pair, subject to the admission gate.
    #[inline]
    pub fn put(&self, key: K, value: V) {
        self.segment.lock().put(key, value)
    }

    /// Removes all entries from the main cache and the admission history.
    #[inline]
    pub fn clear(&self) {
        self.segment.lock().clear()
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher + Clone> CachePolicy<K, V>
    for LruKCache<K, V, S>
{
    fn put(&self, key: K, value: V) {
        LruKCache::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        LruKCache::get(self, key)
    }

    fn get_into(&self, key: &K, value: &mut V) -> bool {
        LruKCache::get_into(self, key, value)
    }

    fn len(&self) -> usize {
        LruKCache::len(self)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> CacheMetrics for LruKCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.lock().metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU-K"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_cache<K: Hash + Eq + Clone, V: Clone>(
        cap: usize,
        history_cap: usize,
        k: u64,
    ) -> LruKCache<K, V> {
        LruKCache::new(LruKCacheConfig::new(cap, history_cap, k))
    }

    #[test]
    fn test_lru_k_admission_gate() {
        let cache = make_cache(4, 16, 2);

        cache.put(1, "one");
        assert_eq!(cache.len(), 0); // one sighting, not admitted
        assert_eq!(cache.get(&1), None); // second sighting

        cache.put(1, "one"); // third sighting, admitted
        assert_eq!(cache.get(&1), Some("one"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_k_put_only_admission() {
        let cache = make_cache(4, 16, 3);

        cache.put(1, "one");
        cache.put(1, "one");
        assert_eq!(cache.len(), 0);

        cache.put(1, "one");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&1), Some("one"));
    }

    #[test]
    fn test_lru_k_resident_overwrite() {
        let cache = make_cache(4, 16, 2);

        cache.put(1, "one");
        cache.put(1, "one"); // admitted
        cache.put(1, "uno"); // resident: overwrite, no gate
        assert_eq!(cache.get(&1), Some("uno"));
    }

    #[test]
    fn test_lru_k_single_sighting_keys_filtered() {
        let cache = make_cache(2, 16, 2);

        // A scan of one-off keys never reaches the main cache
        for i in 0..10 {
            cache.put(i, i);
        }
        assert_eq!(cache.len(), 0);

        // A repeated key does
        cache.put(42, 42);
        cache.put(42, 42);
        assert_eq!(cache.get(&42), Some(42));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_k_history_is_bounded() {
        let cache = make_cache(4, 3, 2);

        for i in 0..10 {
            cache.put(i, i);
        }
        // History only remembers the last 3 keys
        assert_eq!(cache.history_len(), 3);

        // Key 0 aged out of history, so its count restarted
        cache.put(0, 0);
        assert_eq!(cache.get(&0), None);
    }

    #[test]
    fn test_lru_k_history_cleared_on_admission() {
        let cache = make_cache(4, 16, 2);

        cache.put(1, "one");
        assert_eq!(cache.history_len(), 1);
        cache.put(1, "one");
        assert_eq!(cache.history_len(), 0); // moved out of history
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_k_main_evicts_lru() {
        let cache = make_cache(2, 16, 1); // K = 1 admits immediately

        cache.put(1, "a");
        cache.put(2, "b");
        cache.get(&1);
        cache.put(3, "c"); // evicts 2
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&1), Some("a"));
        assert_eq!(cache.get(&3), Some("c"));
    }

    #[test]
    fn test_lru_k_get_into() {
        let cache = make_cache(4, 16, 1);
        cache.put(1, 11);

        let mut out = 0;
        assert!(cache.get_into(&1, &mut out));
        assert_eq!(out, 11);
        assert!(!cache.get_into(&2, &mut out));
        assert_eq!(out, 11);
    }

    #[test]
    fn test_lru_k_clear() {
        let cache = make_cache(4, 16, 2);
        cache.put(1, 1);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.history_len(), 0);
    }

    #[test]
    fn test_lru_k_metrics() {
        let cache = make_cache(4, 16, 2);
        cache.put(1, 1); // deferred
        cache.put(1, 1); // admission
        cache.get(&1); // hit
        cache.get(&2); // miss

        let metrics = cache.metrics();
        assert_eq!(metrics.get("admissions").unwrap(), &1.0);
        assert_eq!(metrics.get("deferred_puts").unwrap(), &1.0);
        assert_eq!(metrics.get("cache_hits").unwrap(), &1.0);
        assert_eq!(metrics.get("cache_misses").unwrap(), &1.0);
        assert_eq!(cache.algorithm_name(), "LRU-K");
    }
}
