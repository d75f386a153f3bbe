//! Unified Cache Entry Type
//!
//! This module provides the `CacheEntry<K, V>` structure used by every
//! replacement engine in the crate. An entry couples a key, a value, and an
//! access counter; the engines decide what the counter means (recency
//! statistics for LRU, the frequency for LFU and the ARC halves).

use core::fmt;

/// A cached record: key, value, and access counter.
///
/// The counter starts at 1 (the insert counts as the first access) and is
/// bumped by [`touch`](CacheEntry::touch) on every hit. LFU and the ARC
/// halves read and rewrite it as the entry's current frequency; LRU keeps
/// it purely as a statistic, since recency is implied by list position.
///
/// # Examples
///
/// ```
/// use polycache::entry::CacheEntry;
///
/// let mut entry = CacheEntry::new("key", 42);
/// assert_eq!(entry.access_count, 1);
/// entry.touch();
/// assert_eq!(entry.access_count, 2);
/// ```
pub struct CacheEntry<K, V> {
    /// The cached key.
    pub key: K,

    /// The cached value.
    pub value: V,

    /// Number of times this entry has been accessed, counting the insert.
    pub access_count: u64,
}

impl<K, V> CacheEntry<K, V> {
    /// Creates a new cache entry with an access count of 1.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            access_count: 1,
        }
    }

    /// Records an access, bumping the counter.
    #[inline]
    pub fn touch(&mut self) {
        self.access_count += 1;
    }
}

impl<K: Clone, V: Clone> Clone for CacheEntry<K, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            access_count: self.access_count,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CacheEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("access_count", &self.access_count)
            .finish()
    }
}
