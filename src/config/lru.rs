//! Configuration for the Least Recently Used (LRU) cache.

use core::fmt;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// LRU evicts the least recently accessed entry when the cache reaches
/// capacity.
///
/// # Examples
///
/// ```
/// use polycache::config::LruCacheConfig;
///
/// let config = LruCacheConfig::new(100);
/// assert_eq!(config.capacity(), 100);
/// ```
#[derive(Clone, Copy)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    capacity: usize,
}

impl LruCacheConfig {
    /// Creates a new configuration for an LRU cache.
    ///
    /// A capacity of 0 is allowed: the resulting cache ignores `put` and
    /// always misses on `get`.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Returns the maximum number of key-value pairs the cache can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_config_creation() {
        let config = LruCacheConfig::new(100);
        assert_eq!(config.capacity(), 100);
    }

    #[test]
    fn test_lru_config_zero_capacity() {
        let config = LruCacheConfig::new(0);
        assert_eq!(config.capacity(), 0);
    }
}
