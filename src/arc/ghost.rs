//! Bounded FIFO of recently evicted keys.
//!
//! Each ARC half keeps one of these next to its resident pool. Membership
//! means "this key was resident here until recently", which turns a plain
//! miss into a near-miss signal the coordinator can adapt on. Values are
//! not retained; a ghost carries only the key.

use crate::list::{List, ListEntry};
use core::hash::{BuildHasher, Hash};
use hashbrown::HashMap;

/// A bounded FIFO of evicted keys with O(1) membership checks.
///
/// The list orders keys newest-front; when full, the oldest ghost falls
/// off the back. The map and the list always agree on contents.
pub(super) struct GhostList<K, S> {
    /// Maximum number of ghost keys retained.
    capacity: usize,
    /// Key to list node, for O(1) membership and removal.
    map: HashMap<K, *mut ListEntry<K>, S>,
    /// FIFO of ghost keys, newest at the front.
    list: List<K>,
}

// SAFETY: GhostList owns all data and raw pointers point only to nodes
// owned by `list`. Concurrent access is safe when wrapped in proper
// synchronization primitives.
unsafe impl<K: Send, S: Send> Send for GhostList<K, S> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause
// data races.
unsafe impl<K: Send, S: Sync> Sync for GhostList<K, S> {}

impl<K, S> GhostList<K, S> {
    #[inline]
    pub(super) fn len(&self) -> usize {
        self.map.len()
    }
}

impl<K: Hash + Eq + Clone, S: BuildHasher> GhostList<K, S> {
    pub(super) fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        GhostList {
            capacity,
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            list: List::new(),
        }
    }

    /// Returns `true` if `key` was recently evicted from the owning half.
    #[cfg(test)]
    pub(super) fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Records `key` as a ghost, dropping the oldest ghost when full.
    ///
    /// With a ghost capacity of 0 the key is simply forgotten.
    pub(super) fn insert(&mut self, key: K) {
        if self.capacity == 0 {
            return;
        }
        debug_assert!(!self.map.contains_key(&key));

        if self.map.len() >= self.capacity {
            if let Some(oldest) = self.list.pop_back() {
                // SAFETY: pop_back yields a detached non-sigil node
                let old_key = unsafe { oldest.take_value() };
                self.map.remove(&old_key);
            }
        }

        let node = self.list.push_front(key.clone());
        self.map.insert(key, node);
        debug_assert_eq!(self.map.len(), self.list.len());
    }

    /// Removes `key` from the ghost set, reporting whether it was present.
    pub(super) fn remove(&mut self, key: &K) -> bool {
        match self.map.remove(key) {
            Some(node) => {
                // SAFETY: node comes from our map, so it is a live node of
                // our list; dropping the boxed key frees it
                unsafe {
                    if let Some(entry) = self.list.unlink(node) {
                        drop(entry.take_value());
                    }
                }
                true
            }
            None => false,
        }
    }

    pub(super) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }
}

impl<K, S> core::fmt::Debug for GhostList<K, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GhostList")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::DefaultHashBuilder;

    fn make_ghosts(cap: usize) -> GhostList<i32, DefaultHashBuilder> {
        GhostList::with_hasher(cap, DefaultHashBuilder::default())
    }

    #[test]
    fn test_ghost_membership() {
        let mut ghosts = make_ghosts(2);
        ghosts.insert(1);
        assert!(ghosts.contains(&1));
        assert!(!ghosts.contains(&2));
        assert_eq!(ghosts.len(), 1);
    }

    #[test]
    fn test_ghost_fifo_bound() {
        let mut ghosts = make_ghosts(2);
        ghosts.insert(1);
        ghosts.insert(2);
        ghosts.insert(3); // 1 is the oldest ghost and falls off
        assert!(!ghosts.contains(&1));
        assert!(ghosts.contains(&2));
        assert!(ghosts.contains(&3));
        assert_eq!(ghosts.len(), 2);
    }

    #[test]
    fn test_ghost_remove() {
        let mut ghosts = make_ghosts(2);
        ghosts.insert(1);
        assert!(ghosts.remove(&1));
        assert!(!ghosts.remove(&1));
        assert_eq!(ghosts.len(), 0);
    }

    #[test]
    fn test_ghost_zero_capacity() {
        let mut ghosts = make_ghosts(0);
        ghosts.insert(1);
        assert!(!ghosts.contains(&1));
        assert_eq!(ghosts.len(), 0);
    }
}
