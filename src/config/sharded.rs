//! Configuration for the hash-sharded cache wrapper.

use core::fmt;

/// Configuration for a [`ShardedCache`](crate::ShardedCache).
///
/// The wrapper fronts `shards` independent engines, each sized
/// `ceil(total_capacity / shards)`, and routes every call by key hash.
/// A shard count of 0 resolves to the machine's available parallelism at
/// construction time.
///
/// # Examples
///
/// ```
/// use polycache::config::ShardedCacheConfig;
///
/// let config = ShardedCacheConfig::new(1024, 8);
/// assert_eq!(config.shards(), 8);
/// assert_eq!(config.shard_capacity(), 128);
///
/// // 0 defers to available parallelism
/// let config = ShardedCacheConfig::new(1024, 0);
/// assert!(config.shards() >= 1);
/// ```
#[derive(Clone, Copy)]
pub struct ShardedCacheConfig {
    /// Total capacity spread across all shards.
    total_capacity: usize,
    /// Number of independent shards (resolved, never 0).
    shards: usize,
}

impl ShardedCacheConfig {
    /// Creates a new sharded-cache configuration.
    ///
    /// `shards == 0` resolves to `std::thread::available_parallelism()`,
    /// falling back to a single shard when parallelism cannot be queried.
    pub fn new(total_capacity: usize, shards: usize) -> Self {
        let shards = if shards > 0 {
            shards
        } else {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1)
        };
        Self {
            total_capacity,
            shards,
        }
    }

    /// Returns the total capacity spread across all shards.
    pub fn total_capacity(&self) -> usize {
        self.total_capacity
    }

    /// Returns the resolved shard count (never 0).
    pub fn shards(&self) -> usize {
        self.shards
    }

    /// Returns the per-shard capacity, `ceil(total_capacity / shards)`.
    pub fn shard_capacity(&self) -> usize {
        self.total_capacity.div_ceil(self.shards)
    }
}

impl fmt::Debug for ShardedCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedCacheConfig")
            .field("total_capacity", &self.total_capacity)
            .field("shards", &self.shards)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sharded_config_creation() {
        let config = ShardedCacheConfig::new(100, 4);
        assert_eq!(config.total_capacity(), 100);
        assert_eq!(config.shards(), 4);
        assert_eq!(config.shard_capacity(), 25);
    }

    #[test]
    fn test_sharded_config_ceil_split() {
        let config = ShardedCacheConfig::new(10, 3);
        assert_eq!(config.shard_capacity(), 4);
    }

    #[test]
    fn test_sharded_config_zero_resolves_to_parallelism() {
        let config = ShardedCacheConfig::new(100, 0);
        assert!(config.shards() >= 1);
    }

    #[test]
    fn test_sharded_config_zero_capacity() {
        let config = ShardedCacheConfig::new(0, 4);
        assert_eq!(config.shard_capacity(), 0);
    }
}
