//! LFU Cache Metrics
//!
//! Metrics specific to the LFU (Least Frequently Used) cache engine. LFU
//! tracks a frequency per entry, so these metrics focus on the frequency
//! distribution and on the decay mechanism that counters cache pollution.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends `CoreCacheMetrics`).
#[derive(Debug, Default, Clone)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all cache engines.
    pub core: CoreCacheMetrics,

    /// Smallest frequency currently present in the cache (0 when empty).
    pub min_frequency: u64,

    /// Largest frequency currently present in the cache (0 when empty).
    pub max_frequency: u64,

    /// Total number of frequency increments (every hit bumps a frequency).
    pub frequency_increments: u64,

    /// Number of distinct frequency buckets currently in use.
    pub active_frequency_levels: u64,

    /// Number of times the decay pass has run.
    pub decay_runs: u64,
}

impl LfuCacheMetrics {
    /// Creates a new zeroed metrics block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frequency increment caused by a hit.
    pub fn record_frequency_increment(&mut self) {
        self.frequency_increments += 1;
    }

    /// Records a completed decay pass.
    pub fn record_decay(&mut self) {
        self.decay_runs += 1;
    }

    /// Refreshes the frequency-distribution gauges from the bucket map.
    pub fn update_frequency_levels<T>(&mut self, frequency_buckets: &BTreeMap<u64, T>) {
        self.active_frequency_levels = frequency_buckets.len() as u64;
        self.min_frequency = frequency_buckets.keys().next().copied().unwrap_or(0);
        self.max_frequency = frequency_buckets.keys().next_back().copied().unwrap_or(0);
    }

    /// Converts the LFU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("min_frequency".to_string(), self.min_frequency as f64);
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert(
            "frequency_increments".to_string(),
            self.frequency_increments as f64,
        );
        metrics.insert(
            "active_frequency_levels".to_string(),
            self.active_frequency_levels as f64,
        );
        metrics.insert("decay_runs".to_string(), self.decay_runs as f64);
        metrics
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}
