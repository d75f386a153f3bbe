//! Cache Metrics System
//!
//! Provides a flexible metrics system for the cache engines using
//! BTreeMap-based metrics reporting. Each engine tracks its own specific
//! metrics while implementing a common `CacheMetrics` trait.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap is used instead of HashMap for several reasons:
//! - **Deterministic ordering**: metrics always appear in consistent order
//! - **Reproducible output**: essential for testing and benchmark comparisons
//! - **Stable serialization**: exports have predictable key ordering
//!
//! The performance difference (O(log n) vs O(1)) is negligible with ~10
//! metric keys, but the deterministic behavior is invaluable when comparing
//! engines.
//!
//! All metrics are count-based; the engines do not track entry sizes.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod arc;
pub mod lfu;
pub mod lru;
pub mod lru_k;

pub use arc::ArcCacheMetrics;
pub use lfu::LfuCacheMetrics;
pub use lru::LruCacheMetrics;
pub use lru_k::LruKCacheMetrics;

/// Common metrics tracked by all cache engines.
#[derive(Debug, Default, Clone)]
pub struct CoreCacheMetrics {
    /// Total number of lookups made against the cache.
    pub requests: u64,

    /// Number of lookups that resulted in cache hits.
    pub cache_hits: u64,

    /// Number of entries inserted into the cache.
    pub insertions: u64,

    /// Number of entries evicted due to capacity constraints.
    pub evictions: u64,
}

impl CoreCacheMetrics {
    /// Creates a new zeroed metrics block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cache hit.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a cache miss.
    ///
    /// Misses are reported as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records an eviction caused by capacity pressure.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records the insertion of a new entry.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Returns the hit rate as a value in `[0.0, 1.0]`.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Returns the miss rate as a value in `[0.0, 1.0]`.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            (self.requests - self.cache_hits) as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the core metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert(
            "cache_misses".to_string(),
            (self.requests - self.cache_hits) as f64,
        );
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());
        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Trait that all cache engines implement for metrics reporting.
///
/// This trait provides a uniform interface for retrieving metrics from any
/// cache implementation, which makes it possible to collect and compare
/// metrics across different replacement policies.
///
/// The trait uses BTreeMap to ensure deterministic ordering of metrics,
/// which is essential for reproducible benchmarks and consistent tests.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification (e.g. "LRU", "ARC").
    fn algorithm_name(&self) -> &'static str;
}
