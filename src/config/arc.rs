//! Configuration for the Adaptive Replacement Cache (ARC).

use core::fmt;

/// Configuration for an ARC (Adaptive Replacement Cache).
///
/// ARC splits its capacity between an LRU half and an LFU half and shifts
/// capacity toward whichever half sees hits in its ghost list. The
/// `transform_threshold` is the access count at which an entry graduates
/// from the LRU half into the LFU half.
///
/// # Examples
///
/// ```
/// use polycache::config::ArcCacheConfig;
///
/// let config = ArcCacheConfig::new(100, 2);
/// assert_eq!(config.capacity(), 100);
/// assert_eq!(config.transform_threshold(), 2);
/// ```
#[derive(Clone, Copy)]
pub struct ArcCacheConfig {
    /// Total resident capacity shared by the two halves.
    capacity: usize,
    /// Access count at which an entry moves from the LRU half to the LFU half.
    transform_threshold: u64,
}

impl ArcCacheConfig {
    /// Creates a new configuration for an ARC cache.
    ///
    /// The transform threshold is clamped to at least 1.
    pub fn new(capacity: usize, transform_threshold: u64) -> Self {
        Self {
            capacity,
            transform_threshold: transform_threshold.max(1),
        }
    }

    /// Returns the total resident capacity shared by the two halves.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the access count at which entries graduate to the LFU half.
    pub fn transform_threshold(&self) -> u64 {
        self.transform_threshold
    }
}

impl fmt::Debug for ArcCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcCacheConfig")
            .field("capacity", &self.capacity)
            .field("transform_threshold", &self.transform_threshold)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_config_creation() {
        let config = ArcCacheConfig::new(64, 3);
        assert_eq!(config.capacity(), 64);
        assert_eq!(config.transform_threshold(), 3);
    }

    #[test]
    fn test_arc_config_clamps_threshold() {
        let config = ArcCacheConfig::new(64, 0);
        assert_eq!(config.transform_threshold(), 1);
    }
}
