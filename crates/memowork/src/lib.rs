//! # memowork
//!
//! Workloads that memoize their results through memocache backends.
//!
//! - **range_sum**: inclusive range sums over a mutable array, cached in a
//!   bounded LRU and invalidated wholesale on every update
//! - **fibonacci**: recursive Fibonacci with the cache threaded through the
//!   recursion, generic over any [`memocache::Memoize`] backend

#![warn(missing_docs)]

pub mod fibonacci;
pub mod range_sum;

pub use fibonacci::{fibonacci, fibonacci_plain, Fibonacci};
pub use range_sum::{CachedArray, PlainArray, Query, RangeKey, RangeQueries};
