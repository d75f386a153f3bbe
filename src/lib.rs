#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Algorithm Selection Guide
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                    Which Replacement Policy Should I Use?                    │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                                                                             │
//! │  Is your workload primarily...                                              │
//! │                                                                             │
//! │  ┌─────────────────┐                                                        │
//! │  │ Recency-based?  │──Yes──▶ Are one-shot keys polluting the cache?         │
//! │  │ (recent = hot)  │              │                                         │
//! │  └────────┬────────┘         Yes  │  No                                     │
//! │           │                   │   │                                         │
//! │          No                   ▼   ▼                                         │
//! │           │               ┌──────────┐  ┌──────────┐                        │
//! │           │               │  LRU-K   │  │   LRU    │                        │
//! │           ▼               └──────────┘  └──────────┘                        │
//! │  ┌─────────────────┐                                                        │
//! │  │ Frequency-based?│──Yes──▶ ┌──────────┐                                   │
//! │  │ (popular = hot) │         │   LFU    │  (decay handles aging keys)       │
//! │  └────────┬────────┘         └──────────┘                                   │
//! │           │                                                                 │
//! │          Mixed / unknown ──▶ ┌──────────┐                                   │
//! │                              │   ARC    │  (adapts the split itself)        │
//! │                              └──────────┘                                   │
//! │                                                                             │
//! │  Heavy multi-threaded traffic on any of the above? Wrap it in               │
//! │  ShardedCache to stripe the locking.                                        │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Engine | Description | Best Use Case |
//! |--------|-------------|---------------|
//! | [`LruCache`] | Least Recently Used | General purpose, recency-based access |
//! | [`LruKCache`] | LRU with K-sighting admission | Scan-heavy workloads |
//! | [`LfuCache`] | Least Frequently Used + decay | Stable popularity patterns |
//! | [`ArcCache`] | Adaptive Replacement Cache | Mixed or shifting workloads |
//! | [`ShardedCache`] | Hash-routed engine fan-out | High thread counts |
//!
//! ## Modules
//!
//! - [`lru`]: Least Recently Used cache implementation
//! - [`lru_k`]: LRU-K cache with sighting-count admission
//! - [`lfu`]: Least Frequently Used cache with frequency decay
//! - [`arc`]: Adaptive Replacement Cache implementation
//! - [`sharded`]: Hash-sharded wrapper over any engine
//! - [`policy`]: The `CachePolicy` trait shared by every engine
//! - [`config`]: Configuration structures for all engines
//! - [`metrics`]: Metrics collection for cache performance monitoring

extern crate alloc;

/// Unified cache entry type.
///
/// Provides the `CacheEntry<K, V>` structure holding a key, a value, and
/// the access counter every replacement policy in this crate keys off.
pub mod entry;

/// Doubly linked list implementation with in-place editing capabilities.
///
/// **Note**: internal infrastructure, not exposed to library consumers.
/// It relies on raw pointer operations that require careful invariant
/// maintenance; use the cache engines instead.
pub(crate) mod list;

/// The common `CachePolicy` capability set implemented by every engine.
pub mod policy;

/// Cache configuration structures.
pub mod config;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used entry
/// when capacity is reached.
pub mod lru;

/// LRU-K cache implementation.
///
/// Fronts an LRU cache with an admission history so that only keys sighted
/// K times enter the main cache.
pub mod lru_k;

/// Least Frequently Used (LFU) cache implementation.
///
/// Tracks per-entry access frequencies and periodically decays them so
/// that long-cold entries cannot pin the cache.
pub mod lfu;

/// Adaptive Replacement Cache (ARC) implementation.
///
/// Splits capacity between a recency pool and a frequency pool and adapts
/// the split based on ghost-list hits.
pub mod arc;

/// Hash-sharded wrapper over any cache engine.
///
/// Routes each key to one of `N` independent engines to reduce lock
/// contention under multi-threaded load.
pub mod sharded;

/// Cache metrics system.
///
/// Provides a metrics collection and reporting interface for all engines.
/// Each engine tracks algorithm-specific metrics while implementing a
/// common trait.
pub mod metrics;

// Re-export cache types
pub use arc::ArcCache;
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use lru_k::LruKCache;
pub use sharded::ShardedCache;

// Re-export the policy trait and entry type
pub use entry::CacheEntry;
pub use policy::CachePolicy;

// Re-export configs at the crate root for convenience
pub use config::{
    ArcCacheConfig, LfuCacheConfig, LruCacheConfig, LruKCacheConfig, ShardedCacheConfig,
};
