//! The frequency-ordered half of the ARC engine.
//!
//! Holds entries that crossed the transform threshold in the LRU half
//! (plus keys re-admitted through this half's ghost list). Frequency
//! accounting works like the standalone LFU engine, but without the
//! average-based decay: ARC counters cache pollution by shifting capacity
//! toward the LRU half instead.

use super::ghost::GhostList;
use crate::entry::CacheEntry;
use crate::list::{List, ListEntry};
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::{BuildHasher, Hash};
use hashbrown::HashMap;

extern crate alloc;

/// LFU half of an ARC cache: frequency buckets, key map, and ghost FIFO.
///
/// As with the LRU half, the resident capacity is mutable while the ghost
/// capacity stays fixed at construction.
pub(super) struct ArcLfuPart<K, V, S> {
    /// Current resident capacity; shifts between 0 and the total.
    capacity: usize,
    /// Smallest frequency with a non-empty bucket; `None` when empty.
    min_freq: Option<u64>,
    /// Key to list node for the resident pool.
    map: HashMap<K, *mut ListEntry<CacheEntry<K, V>>, S>,
    /// Frequency to bucket of entries at that frequency, promotion order
    /// within the bucket. Only non-empty buckets are kept.
    freq_buckets: BTreeMap<u64, List<CacheEntry<K, V>>>,
    /// Keys recently evicted from this half.
    ghosts: GhostList<K, S>,
}

// SAFETY: ArcLfuPart owns all data and raw pointers point only to nodes
// owned by `freq_buckets`. Concurrent access is safe when wrapped in
// proper synchronization primitives.
unsafe impl<K: Send, V: Send, S: Send> Send for ArcLfuPart<K, V, S> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause
// data races.
unsafe impl<K: Send, V: Send, S: Sync> Sync for ArcLfuPart<K, V, S> {}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> ArcLfuPart<K, V, S> {
    pub(super) fn with_hasher(capacity: usize, ghost_capacity: usize, hash_builder: S) -> Self {
        ArcLfuPart {
            capacity,
            min_freq: None,
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder.clone()),
            freq_buckets: BTreeMap::new(),
            ghosts: GhostList::with_hasher(ghost_capacity, hash_builder),
        }
    }

    #[inline]
    pub(super) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.map.len()
    }

    #[cfg(test)]
    pub(super) fn ghost_len(&self) -> usize {
        self.ghosts.len()
    }

    /// Gives this half one more unit of resident capacity.
    pub(super) fn increase_capacity(&mut self) {
        self.capacity += 1;
    }

    /// Takes one unit of resident capacity away, demoting entries to the
    /// ghost list if the pool is now over capacity. Returns the number of
    /// entries demoted.
    pub(super) fn decrease_capacity(&mut self) -> usize {
        debug_assert!(self.capacity > 0);
        if self.capacity == 0 {
            return 0;
        }
        self.capacity -= 1;
        let mut demoted = 0;
        while self.map.len() > self.capacity {
            if self.evict_least_frequent().is_none() {
                break;
            }
            demoted += 1;
        }
        demoted
    }

    /// Looks up a resident key, promoting it one frequency bucket.
    pub(super) fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let node = self.map.get(key).copied()?;
        // SAFETY: node comes from our map, so it is a live node in the
        // bucket matching its current access count
        unsafe {
            self.promote(node);
            Some((*node).get_value().value.clone())
        }
    }

    /// Overwrites a resident key, applying the same hit logic as `get`.
    ///
    /// Returns `Some(value)` when the key is not resident, handing
    /// ownership of `value` back to the caller; returns `None` on success.
    pub(super) fn update(&mut self, key: &K, value: V) -> Option<V> {
        let node = match self.map.get(key).copied() {
            Some(node) => node,
            None => return Some(value),
        };
        // SAFETY: node comes from our map
        unsafe {
            (*node).get_value_mut().value = value;
            self.promote(node);
        }
        None
    }

    /// Installs a new entry at frequency 1.
    pub(super) fn insert(&mut self, key: K, value: V) -> Option<K> {
        self.insert_entry(CacheEntry::new(key, value))
    }

    /// Installs an entry at its carried frequency (1 for fresh installs,
    /// the transform threshold for transfers from the LRU half).
    ///
    /// Evicts the least frequent entry to the ghost list if the pool is
    /// full. With a resident capacity of 0 the key goes straight to the
    /// ghost list, keeping the adaptation loop alive. Returns the key
    /// demoted by an eviction, if any.
    pub(super) fn insert_entry(&mut self, entry: CacheEntry<K, V>) -> Option<K> {
        if self.capacity == 0 {
            self.ghosts.insert(entry.key);
            return None;
        }

        let demoted = if self.map.len() >= self.capacity {
            self.evict_least_frequent()
        } else {
            None
        };

        let freq = entry.access_count;
        let key = entry.key.clone();
        let bucket = self.freq_buckets.entry(freq).or_insert_with(List::new);
        let node = bucket.push_back(entry);
        self.map.insert(key, node);
        self.min_freq = Some(self.min_freq.map_or(freq, |m| m.min(freq)));
        debug_assert!(self.map.len() <= self.capacity);
        demoted
    }

    /// Demotes the head of the smallest non-empty bucket to the ghost
    /// list, returning its key.
    fn evict_least_frequent(&mut self) -> Option<K> {
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
        self.ghosts.insert(entry.key.clone());
        Some(entry.key)
    }

    /// Moves a node from its current bucket to the next higher one.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this half, linked into the bucket
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

    /// Returns `true` if `key` is in this half's ghost list.
    #[cfg(test)]
    pub(super) fn check_ghost(&self, key: &K) -> bool {
        self.ghosts.contains(key)
    }

    /// Removes `key` from the ghost list, reporting whether it was there.
    #[inline]
    pub(super) fn remove_ghost(&mut self, key: &K) -> bool {
        self.ghosts.remove(key)
    }

    pub(super) fn clear(&mut self) {
        self.map.clear();
        self.freq_buckets.clear();
        self.min_freq = None;
        self.ghosts.clear();
    }
}

impl<K, V, S> core::fmt::Debug for ArcLfuPart<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArcLfuPart")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("min_freq", &self.min_freq)
            .field("ghosts", &self.ghosts.len())
            .finish()
    }
}
