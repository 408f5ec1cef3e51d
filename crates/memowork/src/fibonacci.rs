//! Memoized Fibonacci
//!
//! The recursion threads its cache explicitly, so any [`Memoize`] backend can
//! serve it. Values are arbitrary-precision and write-once; nothing here ever
//! evicts on purpose.

use memocache::{CacheStats, Memoize};
use num_bigint_dig::BigUint;
use tracing::trace;

/// Compute F(n) through `cache`, filling it on the way
pub fn fibonacci<M: Memoize<u64, BigUint>>(n: u64, cache: &mut M) -> BigUint {
    memoized(n, cache, &CacheStats::new())
}

/// Compute F(n) by plain double recursion, exponential time
pub fn fibonacci_plain(n: u64) -> BigUint {
    if n <= 1 {
        return BigUint::from(n);
    }
    fibonacci_plain(n - 1) + fibonacci_plain(n - 2)
}

/// Fibonacci evaluator owning its cache and usage counters
pub struct Fibonacci<M> {
    cache: M,
    stats: CacheStats,
}

impl<M: Memoize<u64, BigUint>> Fibonacci<M> {
    /// Evaluate through the given (usually empty) cache
    pub fn new(cache: M) -> Self {
        Self {
            cache,
            stats: CacheStats::new(),
        }
    }

    /// Compute F(n)
    pub fn compute(&mut self, n: u64) -> BigUint {
        memoized(n, &mut self.cache, &self.stats)
    }

    /// Backing cache
    pub fn cache(&self) -> &M {
        &self.cache
    }

    /// Cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

fn memoized<M: Memoize<u64, BigUint>>(n: u64, cache: &mut M, stats: &CacheStats) -> BigUint {
    if let Some(value) = cache.lookup(&n) {
        stats.record_hit();
        return value.clone();
    }
    stats.record_miss();
    trace!(n, "fibonacci miss");

    let value = if n <= 1 {
        BigUint::from(n)
    } else {
        let a = memoized(n - 1, cache, stats);
        let b = memoized(n - 2, cache, stats);
        a + b
    };
    stats.record_computation();

    cache.store(n, value.clone());
    stats.record_insert();
    value
}
