//! Configuration for the Least Frequently Used (LFU) cache.

use core::fmt;

/// Default ceiling for the running average access frequency.
pub const DEFAULT_MAX_AVG_FREQ: u64 = 10;

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// LFU tracks the access frequency of each entry and evicts the least
/// frequently used entry when the cache reaches capacity. To keep
/// historically hot keys from pinning the cache forever, the engine decays
/// every frequency by `max_avg_freq / 2` whenever the running average
/// frequency climbs above `max_avg_freq`.
///
/// # Examples
///
/// ```
/// use polycache::config::LfuCacheConfig;
///
/// let config = LfuCacheConfig::new(100);
/// assert_eq!(config.max_avg_freq(), 10);
///
/// let config = LfuCacheConfig::new(100).with_max_avg_freq(50);
/// assert_eq!(config.max_avg_freq(), 50);
/// ```
#[derive(Clone, Copy)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    capacity: usize,
    /// Average-frequency ceiling that triggers decay.
    max_avg_freq: u64,
}

impl LfuCacheConfig {
    /// Creates a new configuration with the default decay ceiling.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            max_avg_freq: DEFAULT_MAX_AVG_FREQ,
        }
    }

    /// Sets the average-frequency ceiling that triggers decay.
    ///
    /// Larger values make decay rarer (each decay is O(resident set));
    /// clamped to at least 1.
    #[must_use]
    pub fn with_max_avg_freq(mut self, max_avg_freq: u64) -> Self {
        self.max_avg_freq = max_avg_freq.max(1);
        self
    }

    /// Returns the maximum number of key-value pairs the cache can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the average-frequency ceiling that triggers decay.
    pub fn max_avg_freq(&self) -> u64 {
        self.max_avg_freq
    }
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .field("max_avg_freq", &self.max_avg_freq)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_config_creation() {
        let config = LfuCacheConfig::new(100);
        assert_eq!(config.capacity(), 100);
        assert_eq!(config.max_avg_freq(), DEFAULT_MAX_AVG_FREQ);
    }

    #[test]
    fn test_lfu_config_builder() {
        let config = LfuCacheConfig::new(100).with_max_avg_freq(25);
        assert_eq!(config.max_avg_freq(), 25);
    }

    #[test]
    fn test_lfu_config_clamps_ceiling() {
        let config = LfuCacheConfig::new(100).with_max_avg_freq(0);
        assert_eq!(config.max_avg_freq(), 1);
    }
}
