//! # ordcache
//!
//! Size-bounded LRU cache.
//!
//! ## Architecture
//! - **Index**: AHash map from key to node handle and value (O(1))
//! - **Recency list**: [`ordkit::LinkedList`] of keys, least recently used at
//!   the head (O(1) touch and eviction)
//! - **Variants**: [`LruCache`] for callers that already serialise access,
//!   [`ConcurrentLruCache`] guarded by a `parking_lot` reader/writer lock
//! - **Statistics**: hit/miss/eviction counters on the concurrent variant

#![warn(missing_docs)]

mod cache;
mod config;
mod index;
mod lru;
mod stats;

pub use cache::ConcurrentLruCache;
pub use config::CacheConfig;
pub use lru::LruCache;
pub use ordkit::{Error, Result};
pub use stats::{CacheStats, StatsSnapshot};
