//! # memocache
//!
//! Cache backends for memoizing expensive, repeatable computations.
//!
//! ## Backends
//! - **LruCache**: bounded, AHash map plus an index-linked recency list,
//!   O(1) `get`/`put`, evicts the least recently used entry on overflow
//! - **SplayCache**: unbounded self-adjusting BST, O(log n) amortized,
//!   splays hits to the root and leaves the tree untouched on a miss
//!
//! Both implement [`Memoize`], so a computation can be written once and run
//! against either backend.

#![warn(missing_docs)]

mod error;
mod lru;
mod memo;
mod splay;
mod stats;

pub use error::{Error, Result};
pub use lru::LruCache;
pub use memo::Memoize;
pub use splay::SplayCache;
pub use stats::{CacheStats, StatsSnapshot};
