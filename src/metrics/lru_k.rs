//! LRU-K Cache Metrics
//!
//! Metrics specific to the LRU-K engine, which gates admission into its
//! main cache on a key having been sighted K times.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU-K-specific metrics (extends `CoreCacheMetrics`).
#[derive(Debug, Default, Clone)]
pub struct LruKCacheMetrics {
    /// Core metrics common to all cache engines.
    pub core: CoreCacheMetrics,

    /// Number of keys admitted into the main cache after reaching K sightings.
    pub admissions: u64,

    /// Number of puts deferred because the key had fewer than K sightings.
    pub deferred_puts: u64,
}

impl LruKCacheMetrics {
    /// Creates a new zeroed metrics block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the admission of a key into the main cache.
    pub fn record_admission(&mut self) {
        self.admissions += 1;
    }

    /// Records a put held back by the admission gate.
    pub fn record_deferred_put(&mut self) {
        self.deferred_puts += 1;
    }

    /// Converts the LRU-K metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("admissions".to_string(), self.admissions as f64);
        metrics.insert("deferred_puts".to_string(), self.deferred_puts as f64);
        metrics
    }
}

impl CacheMetrics for LruKCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU-K"
    }
}
