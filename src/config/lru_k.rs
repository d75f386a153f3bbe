//! Configuration for the LRU-K cache with sighting-count admission.

use core::fmt;

/// Configuration for an LRU-K cache.
///
/// LRU-K fronts a main LRU cache with an admission history: a key only
/// enters the main cache once it has been sighted `k` times. The history
/// is itself LRU-bounded, so admission state stays O(`history_capacity`).
///
/// # Examples
///
/// ```
/// use polycache::config::LruKCacheConfig;
///
/// let config = LruKCacheConfig::new(100, 400, 2);
/// assert_eq!(config.capacity(), 100);
/// assert_eq!(config.history_capacity(), 400);
/// assert_eq!(config.k(), 2);
/// ```
#[derive(Clone, Copy)]
pub struct LruKCacheConfig {
    /// Maximum number of key-value pairs the main cache can hold.
    capacity: usize,
    /// Maximum number of keys tracked by the admission history.
    history_capacity: usize,
    /// Number of sightings required before a key is admitted.
    k: u64,
}

impl LruKCacheConfig {
    /// Creates a new configuration for an LRU-K cache.
    ///
    /// `k` is clamped to at least 1; an admission threshold of 0 would
    /// degenerate to plain LRU while still paying for the history.
    pub fn new(capacity: usize, history_capacity: usize, k: u64) -> Self {
        Self {
            capacity,
            history_capacity,
            k: k.max(1),
        }
    }

    /// Returns the main cache capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the admission history capacity.
    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    /// Returns the number of sightings required for admission.
    pub fn k(&self) -> u64 {
        self.k
    }
}

impl fmt::Debug for LruKCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruKCacheConfig")
            .field("capacity", &self.capacity)
            .field("history_capacity", &self.history_capacity)
            .field("k", &self.k)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_k_config_creation() {
        let config = LruKCacheConfig::new(100, 200, 3);
        assert_eq!(config.capacity(), 100);
        assert_eq!(config.history_capacity(), 200);
        assert_eq!(config.k(), 3);
    }

    #[test]
    fn test_lru_k_config_clamps_k() {
        let config = LruKCacheConfig::new(10, 10, 0);
        assert_eq!(config.k(), 1);
    }
}
