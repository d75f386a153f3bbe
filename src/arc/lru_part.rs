//! The recency-ordered half of the ARC engine.
//!
//! Holds entries whose access count has not yet crossed the transform
//! threshold. Hits move entries to the MRU position and bump their count;
//! when the count reaches the threshold the coordinator pulls the entry
//! out and hands it to the LFU half. Evicted entries leave their key
//! behind in this half's ghost list.

use super::ghost::GhostList;
use crate::entry::CacheEntry;
use crate::list::{List, ListEntry};
use core::hash::{BuildHasher, Hash};
use hashbrown::HashMap;

/// LRU half of an ARC cache: recency list, key map, and ghost FIFO.
///
/// The resident capacity is mutable (the coordinator shifts capacity
/// between halves); the ghost capacity is fixed at construction so that a
/// half squeezed to zero residents can still produce the ghost hits that
/// win its capacity back.
pub(super) struct ArcLruPart<K, V, S> {
    /// Current resident capacity; shifts between 0 and the total.
    capacity: usize,
    /// Access count at which entries graduate to the LFU half.
    transform_threshold: u64,
    /// Key to list node for the resident pool.
    map: HashMap<K, *mut ListEntry<CacheEntry<K, V>>, S>,
    /// Recency list; most recently used at the front.
    list: List<CacheEntry<K, V>>,
    /// Keys recently evicted from this half.
    ghosts: GhostList<K, S>,
}

// SAFETY: ArcLruPart owns all data and raw pointers point only to nodes
// owned by `list`. Concurrent access is safe when wrapped in proper
// synchronization primitives.
unsafe impl<K: Send, V: Send, S: Send> Send for ArcLruPart<K, V, S> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause
// data races.
unsafe impl<K: Send, V: Send, S: Sync> Sync for ArcLruPart<K, V, S> {}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> ArcLruPart<K, V, S> {
    pub(super) fn with_hasher(
        capacity: usize,
        ghost_capacity: usize,
        transform_threshold: u64,
        hash_builder: S,
    ) -> Self {
        ArcLruPart {
            capacity,
            transform_threshold,
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder.clone()),
            list: List::new(),
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

    #[inline]
    pub(super) fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
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
            if self.evict_least_recent().is_none() {
                break;
            }
            demoted += 1;
        }
        demoted
    }

    /// Looks up a resident key.
    ///
    /// On a hit the entry moves to the MRU position and its count is
    /// bumped; the returned flag reports whether the count has reached the
    /// transform threshold (the coordinator then calls [`take`](Self::take)
    /// to move the entry across).
    pub(super) fn get(&mut self, key: &K) -> Option<(V, bool)>
    where
        V: Clone,
    {
        let node = self.map.get(key).copied()?;
        unsafe {
            // SAFETY: node comes from our map, so it is a live node of our
            // list
            self.list.move_to_front(node);
            let entry = (*node).get_value_mut();
            entry.touch();
            Some((
                entry.value.clone(),
                entry.access_count >= self.transform_threshold,
            ))
        }
    }

    /// Overwrites a resident key, applying the same hit logic as `get`.
    ///
    /// Returns `None` when the key is not resident (the value is lost, so
    /// callers check residency first); otherwise the threshold flag.
    pub(super) fn update(&mut self, key: &K, value: V) -> Option<bool> {
        let node = self.map.get(key).copied()?;
        unsafe {
            // SAFETY: node comes from our map
            self.list.move_to_front(node);
            let entry = (*node).get_value_mut();
            entry.value = value;
            entry.touch();
            Some(entry.access_count >= self.transform_threshold)
        }
    }

    /// Installs a new entry at access count 1.
    ///
    /// Evicts the LRU entry to the ghost list if the pool is full. With a
    /// resident capacity of 0 the key goes straight to the ghost list, so
    /// a repeat sighting can still drive capacity adaptation. Returns the
    /// key demoted to the ghost list, if an eviction happened.
    pub(super) fn insert(&mut self, key: K, value: V) -> Option<K> {
        if self.capacity == 0 {
            self.ghosts.insert(key);
            return None;
        }

        let demoted = if self.map.len() >= self.capacity {
            self.evict_least_recent()
        } else {
            None
        };

        let node = self.list.push_front(CacheEntry::new(key.clone(), value));
        self.map.insert(key, node);
        debug_assert!(self.map.len() <= self.capacity);
        demoted
    }

    /// Demotes the LRU-end entry to the ghost list, returning its key.
    fn evict_least_recent(&mut self) -> Option<K> {
        let node = self.list.pop_back()?;
        // SAFETY: pop_back yields a detached non-sigil node
        let entry = unsafe { node.take_value() };
        self.map.remove(&entry.key);
        self.ghosts.insert(entry.key.clone());
        Some(entry.key)
    }

    /// Removes a resident entry without ghosting it, for transfer to the
    /// LFU half.
    pub(super) fn take(&mut self, key: &K) -> Option<CacheEntry<K, V>> {
        let node = self.map.remove(key)?;
        // SAFETY: node comes from our map and was just unregistered
        let boxed = unsafe { self.list.unlink(node) }?;
        // SAFETY: unlink yields a detached non-sigil node
        Some(unsafe { boxed.take_value() })
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
        self.list.clear();
        self.ghosts.clear();
    }
}

impl<K, V, S> core::fmt::Debug for ArcLruPart<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArcLruPart")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("ghosts", &self.ghosts.len())
            .finish()
    }
}
