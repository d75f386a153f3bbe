//! Cache Configuration Module
//!
//! This module provides configuration structures for all cache engine
//! implementations. Each engine has its own dedicated configuration struct
//! that encapsulates its parameters.
//!
//! # Design Philosophy
//!
//! Each cache is created from its configuration struct as the **single
//! entry point**:
//!
//! - **Consistent API**: all engines are created the same way: `Cache::new(config)`
//! - **Builder pattern**: optional parameters use fluent builder methods
//! - **Type safety**: required parameters must be provided at construction
//! - **Extensible**: new parameters can be added without breaking existing code
//!
//! Capacities are plain `usize`; a capacity of 0 is legal and yields an
//! engine whose `put` is a no-op and whose `get` always misses.
//!
//! # Configs
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | [`LruCacheConfig`] | [`LruCache`](crate::LruCache) | Least Recently Used |
//! | [`LruKCacheConfig`] | [`LruKCache`](crate::LruKCache) | LRU with K-sighting admission |
//! | [`LfuCacheConfig`] | [`LfuCache`](crate::LfuCache) | Least Frequently Used with decay |
//! | [`ArcCacheConfig`] | [`ArcCache`](crate::ArcCache) | Adaptive Replacement Cache |
//! | [`ShardedCacheConfig`] | [`ShardedCache`](crate::ShardedCache) | Hash-sharded wrapper |
//!
//! # Examples
//!
//! ```
//! use polycache::config::LruCacheConfig;
//! use polycache::LruCache;
//!
//! let config = LruCacheConfig::new(1000);
//! let cache: LruCache<String, i32> = LruCache::new(config);
//! ```

pub mod arc;
pub mod lfu;
pub mod lru;
pub mod lru_k;
pub mod sharded;

pub use arc::ArcCacheConfig;
pub use lfu::LfuCacheConfig;
pub use lru::LruCacheConfig;
pub use lru_k::LruKCacheConfig;
pub use sharded::ShardedCacheConfig;
