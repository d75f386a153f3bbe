//! ARC Cache Metrics
//!
//! Metrics specific to the ARC (Adaptive Replacement Cache) engine. ARC
//! balances an LRU half against an LFU half, so its metrics expose the
//! current capacity split, the ghost hits that drive adaptation, and the
//! entries transferred between halves.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// ARC-specific metrics (extends `CoreCacheMetrics`).
#[derive(Debug, Default, Clone)]
pub struct ArcCacheMetrics {
    /// Core metrics common to all cache engines.
    pub core: CoreCacheMetrics,

    /// Current resident capacity of the LRU half.
    pub lru_capacity: u64,

    /// Current resident capacity of the LFU half.
    pub lfu_capacity: u64,

    /// Ghost hits in the LRU half (recency-biased workload signal).
    pub lru_ghost_hits: u64,

    /// Ghost hits in the LFU half (frequency-biased workload signal).
    pub lfu_ghost_hits: u64,

    /// Entries transferred from the LRU half to the LFU half after
    /// crossing the transform threshold.
    pub transfers: u64,
}

impl ArcCacheMetrics {
    /// Creates a new metrics block with the initial capacity split.
    pub fn new(lru_capacity: u64, lfu_capacity: u64) -> Self {
        Self {
            lru_capacity,
            lfu_capacity,
            ..Self::default()
        }
    }

    /// Records a ghost hit in the LRU half.
    pub fn record_lru_ghost_hit(&mut self) {
        self.lru_ghost_hits += 1;
    }

    /// Records a ghost hit in the LFU half.
    pub fn record_lfu_ghost_hit(&mut self) {
        self.lfu_ghost_hits += 1;
    }

    /// Records a threshold transfer from the LRU half to the LFU half.
    pub fn record_transfer(&mut self) {
        self.transfers += 1;
    }

    /// Refreshes the capacity-split gauges.
    pub fn update_capacities(&mut self, lru_capacity: u64, lfu_capacity: u64) {
        self.lru_capacity = lru_capacity;
        self.lfu_capacity = lfu_capacity;
    }

    /// Converts the ARC metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("lru_capacity".to_string(), self.lru_capacity as f64);
        metrics.insert("lfu_capacity".to_string(), self.lfu_capacity as f64);
        metrics.insert("lru_ghost_hits".to_string(), self.lru_ghost_hits as f64);
        metrics.insert("lfu_ghost_hits".to_string(), self.lfu_ghost_hits as f64);
        metrics.insert("transfers".to_string(), self.transfers as f64);
        metrics
    }
}

impl CacheMetrics for ArcCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "ARC"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_metrics_capacity_split() {
        let mut m = ArcCacheMetrics::new(4, 0);
        assert_eq!(m.lru_capacity, 4);
        assert_eq!(m.lfu_capacity, 0);

        m.update_capacities(3, 1);
        let report = m.to_btreemap();
        assert_eq!(report.get("lru_capacity"), Some(&3.0));
        assert_eq!(report.get("lfu_capacity"), Some(&1.0));
    }

    #[test]
    fn test_arc_metrics_ghost_hits() {
        let mut m = ArcCacheMetrics::new(2, 2);
        m.record_lru_ghost_hit();
        m.record_lfu_ghost_hit();
        m.record_lfu_ghost_hit();
        m.record_transfer();

        assert_eq!(m.lru_ghost_hits, 1);
        assert_eq!(m.lfu_ghost_hits, 2);
        assert_eq!(m.transfers, 1);
    }
}
