//! LRU Cache Metrics
//!
//! Metrics specific to the LRU (Least Recently Used) cache engine.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;

/// LRU-specific metrics (extends `CoreCacheMetrics`).
///
/// LRU uses only the core counters; position in the recency list carries
/// all the per-entry state. The structure exists for consistency with the
/// other engines and as a place for future LRU-specific metrics.
#[derive(Debug, Default, Clone)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache engines.
    pub core: CoreCacheMetrics,
}

impl LruCacheMetrics {
    /// Creates a new zeroed metrics block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts the LRU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        self.core.to_btreemap()
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
