//! Least Recently Used (LRU) Cache Implementation
//!
//! An LRU cache evicts the least recently accessed entry when capacity is
//! reached. This implementation provides O(1) time complexity for all
//! operations using a hash map combined with a doubly-linked list.
//!
//! # How the Algorithm Works
//!
//! The LRU algorithm is based on **temporal locality**: entries accessed
//! recently are likely to be accessed again soon. The cache maintains
//! entries ordered by their last access.
//!
//! ## Data Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        LRU Cache                                │
//! │                                                                 │
//! │  HashMap<K, *Node>          Doubly-Linked List                  │
//! │  ┌──────────────┐          ┌──────────────────────────────┐     │
//! │  │ "apple" ──────────────▶ │ MRU ◀──▶ ... ◀──▶ LRU        │     │
//! │  │ "banana" ─────────────▶ │  ▲                    │      │     │
//! │  │ "cherry" ─────────────▶ │  │                    ▼      │     │
//! │  └──────────────┘          │ front               back     │     │
//! │                            └──────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **HashMap**: O(1) key lookup, storing pointers to list nodes
//! - **List**: access order, most recent at the front, least recent at the back
//!
//! ## Eviction Example
//!
//! ```text
//! Cache capacity: 3
//!
//! put("a", 1)  →  [a]
//! put("b", 2)  →  [b, a]
//! put("c", 3)  →  [c, b, a]
//! get("a")     →  [a, c, b]       // "a" moved to front (MRU)
//! put("d", 4)  →  [d, a, c]       // "b" evicted (was LRU)
//! ```
//!
//! # Thread Safety
//!
//! [`LruCache`] guards its state with a single internal mutex; every method
//! is one self-contained critical section and lookups return clones of the
//! stored value. Share it across threads behind an `Arc`, or front several
//! instances with [`ShardedCache`](crate::ShardedCache) to reduce lock
//! contention.
//!
//! # Examples
//!
//! ```
//! use polycache::LruCache;
//! use polycache::config::LruCacheConfig;
//!
//! let cache = LruCache::new(LruCacheConfig::new(3));
//!
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("c", 3);
//!
//! assert_eq!(cache.get(&"a"), Some(1));  // "a" is now MRU
//!
//! cache.put("d", 4);  // Evicts "b" (LRU)
//! assert_eq!(cache.get(&"b"), None);
//! ```

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::entry::CacheEntry;
use crate::list::{List, ListEntry};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use crate::policy::CachePolicy;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use hashbrown::DefaultHashBuilder;
use hashbrown::HashMap;
use parking_lot::Mutex;

/// Internal LRU segment containing the actual cache algorithm.
///
/// This is shared between [`LruCache`] (which wraps it in a mutex) and the
/// LRU-K engine (which embeds one segment for its main cache and one for
/// its admission history). All algorithm logic lives here.
///
/// # Safety
///
/// This struct contains raw pointers in the `map` field. These pointers are
/// always valid as long as:
/// - the pointer was obtained from a `list` push
/// - the node has not been removed from the list
/// - the segment has not been dropped
pub(crate) struct LruSegment<K, V, S = DefaultHashBuilder> {
    /// Maximum number of resident entries.
    capacity: usize,
    /// Recency list; most recently used at the front.
    list: List<CacheEntry<K, V>>,
    /// Key to list node. The map is the authoritative set of live entries.
    map: HashMap<K, *mut ListEntry<CacheEntry<K, V>>, S>,
    metrics: LruCacheMetrics,
}

// SAFETY: LruSegment owns all data and raw pointers point only to nodes
// owned by `list`. Concurrent access is safe when wrapped in proper
// synchronization primitives.
unsafe impl<K: Send, V: Send, S: Send> Send for LruSegment<K, V, S> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause
// data races.
unsafe impl<K: Send, V: Send, S: Sync> Sync for LruSegment<K, V, S> {}

impl<K, V, S> LruSegment<K, V, S> {
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
    pub(crate) fn metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruSegment<K, V, S> {
    /// Creates a new LRU segment with the given capacity and hash builder.
    pub(crate) fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        LruSegment {
            capacity,
            list: List::new(),
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            metrics: LruCacheMetrics::new(),
        }
    }

    #[inline]
    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Looks up a key, moving its entry to the MRU position on a hit.
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if let Some(node) = self.map.get(key).copied() {
            unsafe {
                // SAFETY: node comes from our map, so it is a live node of
                // our list
                self.list.move_to_front(node);
                let entry = (*node).get_value_mut();
                entry.touch();
                self.metrics.core.record_hit();
                Some(&entry.value)
            }
        } else {
            self.metrics.core.record_miss();
            None
        }
    }

    /// Inserts a key-value pair.
    ///
    /// Overwrites and moves to the MRU position when the key is resident;
    /// otherwise evicts the LRU entry first if the segment is full. Returns
    /// the replaced or evicted pair, if any. A capacity of 0 makes this a
    /// no-op.
    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if self.capacity == 0 {
            return None;
        }

        if let Some(&node) = self.map.get(&key) {
            unsafe {
                // SAFETY: node comes from our map
                self.list.move_to_front(node);
                let entry = (*node).get_value_mut();
                entry.touch();
                let old_key = core::mem::replace(&mut entry.key, key);
                let old_value = core::mem::replace(&mut entry.value, value);
                return Some((old_key, old_value));
            }
        }

        let evicted = if self.map.len() >= self.capacity {
            self.evict_least_recent()
        } else {
            None
        };

        let node = self.list.push_front(CacheEntry::new(key.clone(), value));
        self.map.insert(key, node);
        self.metrics.core.record_insertion();
        debug_assert!(self.map.len() <= self.capacity);
        debug_assert_eq!(self.map.len(), self.list.len());

        evicted
    }

    /// Removes the entry at the LRU end, returning it.
    fn evict_least_recent(&mut self) -> Option<(K, V)> {
        let node = self.list.pop_back()?;
        // SAFETY: pop_back yields a detached non-sigil node
        let entry = unsafe { node.take_value() };
        self.map.remove(&entry.key);
        self.metrics.core.record_eviction();
        Some((entry.key, entry.value))
    }

    /// Removes a key, returning its value if it was resident.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.remove(key)?;
        // SAFETY: node comes from our map and was just unregistered
        let boxed = unsafe { self.list.unlink(node) }?;
        // SAFETY: unlink yields a detached non-sigil node
        let entry = unsafe { boxed.take_value() };
        Some(entry.value)
    }

    /// Removes every entry.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }
}

impl<K, V, S> core::fmt::Debug for LruSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .finish()
    }
}

/// A thread-safe Least Recently Used (LRU) cache with O(1) operations.
///
/// Maintains entries in order of access recency. When capacity is reached,
/// the least recently accessed entry is evicted to make room for new ones,
/// regardless of how often it was accessed.
///
/// Every method takes `&self` and locks the engine's internal mutex for the
/// duration of the call; lookups return clones of the stored value, never
/// references into the cache.
///
/// # Type Parameters
///
/// - `K`: key type, `Hash + Eq` (plus `Clone` for `put`)
/// - `V`: value type, `Clone` for retrieval
/// - `S`: hash builder, defaults to `DefaultHashBuilder`
///
/// # Example
///
/// ```
/// use polycache::LruCache;
/// use polycache::config::LruCacheConfig;
///
/// let cache = LruCache::new(LruCacheConfig::new(2));
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
/// assert_eq!(cache.get(&"apple"), Some(1));
///
/// // "banana" is now LRU, so it gets evicted
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// ```
#[derive(Debug)]
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    segment: Mutex<LruSegment<K, V, S>>,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache from a configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use polycache::LruCache;
    /// use polycache::config::LruCacheConfig;
    ///
    /// let cache: LruCache<String, i32> = LruCache::new(LruCacheConfig::new(100));
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(config: LruCacheConfig) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with a custom hash builder.
    ///
    /// Use this for deterministic hashing or DoS-resistant hashers.
    pub fn with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: Mutex::new(LruSegment::with_hasher(config.capacity(), hash_builder)),
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

    /// Returns `true` if the key is currently resident.
    ///
    /// Does not count as an access: recency order and metrics are untouched.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().contains(key)
    }

    /// Retrieves a clone of the value for the given key.
    ///
    /// On a hit the entry moves to the most-recently-used position and its
    /// access counter is bumped.
    ///
    /// # Example
    ///
    /// ```
    /// use polycache::LruCache;
    /// use polycache::config::LruCacheConfig;
    ///
    /// let cache = LruCache::new(LruCacheConfig::new(10));
    /// cache.put("key", 42);
    ///
    /// assert_eq!(cache.get(&"key"), Some(42));
    /// assert_eq!(cache.get(&"missing"), None);
    /// ```
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
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts a key-value pair into the cache.
    ///
    /// If the key already exists the value is replaced and the entry moves
    /// to the MRU position; the old pair is returned. If the cache is at
    /// capacity, the least recently used entry is evicted and returned.
    /// With a capacity of 0 this is a no-op.
    ///
    /// # Example
    ///
    /// ```
    /// use polycache::LruCache;
    /// use polycache::config::LruCacheConfig;
    ///
    /// let cache = LruCache::new(LruCacheConfig::new(2));
    ///
    /// assert_eq!(cache.put("a", 1), None);            // new entry
    /// assert_eq!(cache.put("b", 2), None);            // new entry
    /// assert_eq!(cache.put("a", 10), Some(("a", 1))); // update existing
    /// assert_eq!(cache.put("c", 3), Some(("b", 2)));  // evicts "b"
    /// ```
    #[inline]
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.segment.lock().put(key, value)
    }

    /// Removes a key from the cache, returning the value if it was present.
    ///
    /// # Example
    ///
    /// ```
    /// use polycache::LruCache;
    /// use polycache::config::LruCacheConfig;
    ///
    /// let cache = LruCache::new(LruCacheConfig::new(10));
    /// cache.put("key", 42);
    ///
    /// assert_eq!(cache.remove(&"key"), Some(42));
    /// assert_eq!(cache.remove(&"key"), None);  // already removed
    /// ```
    #[inline]
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().remove(key)
    }

    /// Removes all entries from the cache.
    #[inline]
    pub fn clear(&self) {
        self.segment.lock().clear()
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> CachePolicy<K, V> for LruCache<K, V, S> {
    fn put(&self, key: K, value: V) {
        LruCache::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        LruCache::get(self, key)
    }

    fn get_into(&self, key: &K, value: &mut V) -> bool {
        LruCache::get_into(self, key, value)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.lock().metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
