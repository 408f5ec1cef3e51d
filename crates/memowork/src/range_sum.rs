//! Range-sum queries over a mutable array
//!
//! [`CachedArray`] memoizes inclusive range sums in a bounded LRU cache and
//! drops every cached range whenever any element changes. The invalidation is
//! deliberately coarse: one update clears ranges that never covered the index.

use memocache::{CacheStats, Error, LruCache, Result};
use tracing::{debug, trace};

/// Cache key for an inclusive `[low, high]` range-sum query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeKey {
    /// First index (inclusive)
    pub low: usize,
    /// Last index (inclusive)
    pub high: usize,
}

/// One step of a range-sum workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Sum of `values[low..=high]`
    Range {
        /// First index (inclusive)
        low: usize,
        /// Last index (inclusive)
        high: usize,
    },
    /// Set `values[index] = value`
    Update {
        /// Index to overwrite
        index: usize,
        /// New value
        value: i64,
    },
}

/// Operations a range-sum workload issues against an array
pub trait RangeQueries {
    /// Sum of the inclusive range `[low, high]`
    fn range_sum(&mut self, low: usize, high: usize) -> Result<i64>;

    /// Overwrite one element
    fn update(&mut self, index: usize, value: i64) -> Result<()>;

    /// Run a single query, returning the sum for range queries
    fn apply(&mut self, query: Query) -> Result<Option<i64>> {
        match query {
            Query::Range { low, high } => self.range_sum(low, high).map(Some),
            Query::Update { index, value } => self.update(index, value).map(|_| None),
        }
    }
}

/// Array answering every query by recomputation
#[derive(Debug, Clone)]
pub struct PlainArray {
    values: Vec<i64>,
}

impl PlainArray {
    /// Wrap the given values
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    /// Current contents
    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

impl RangeQueries for PlainArray {
    fn range_sum(&mut self, low: usize, high: usize) -> Result<i64> {
        sum_range(&self.values, low, high)
    }

    fn update(&mut self, index: usize, value: i64) -> Result<()> {
        set_value(&mut self.values, index, value)
    }
}

/// Array whose range sums are memoized in an LRU cache
pub struct CachedArray {
    values: Vec<i64>,
    cache: LruCache<RangeKey, i64>,
    stats: CacheStats,
}

impl CachedArray {
    /// Wrap the given values with a cache holding up to `capacity` ranges
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - `capacity` is zero
    pub fn new(values: Vec<i64>, capacity: usize) -> Result<Self> {
        Ok(Self {
            values,
            cache: LruCache::new(capacity)?,
            stats: CacheStats::new(),
        })
    }

    /// Current contents
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of cached ranges
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Check whether a range is currently cached, without touching recency
    pub fn is_cached(&self, low: usize, high: usize) -> bool {
        self.cache.contains(&RangeKey { low, high })
    }

    /// Drop every cached range
    pub fn invalidate(&mut self) {
        let dropped = self.cache.len();
        self.cache.clear();
        self.stats.record_invalidation();
        debug!(dropped, "range cache invalidated");
    }
}

impl RangeQueries for CachedArray {
    fn range_sum(&mut self, low: usize, high: usize) -> Result<i64> {
        check_range(self.values.len(), low, high)?;

        let key = RangeKey { low, high };
        if let Some(&sum) = self.cache.get(&key) {
            self.stats.record_hit();
            return Ok(sum);
        }

        self.stats.record_miss();
        trace!(low, high, "range sum miss");
        let sum = sum_range(&self.values, low, high)?;
        self.stats.record_computation();

        if self.cache.push(key, sum).is_some() {
            self.stats.record_eviction();
        }
        self.stats.record_insert();

        Ok(sum)
    }

    fn update(&mut self, index: usize, value: i64) -> Result<()> {
        set_value(&mut self.values, index, value)?;
        self.invalidate();
        Ok(())
    }
}

fn check_range(len: usize, low: usize, high: usize) -> Result<()> {
    if low > high {
        return Err(Error::InvalidRange { low, high });
    }
    if high >= len {
        return Err(Error::IndexOutOfBounds { index: high, len });
    }
    Ok(())
}

fn sum_range(values: &[i64], low: usize, high: usize) -> Result<i64> {
    check_range(values.len(), low, high)?;
    values[low..=high]
        .iter()
        .try_fold(0i64, |acc, value| acc.checked_add(*value))
        .ok_or(Error::SumOverflow { low, high })
}

fn set_value(values: &mut [i64], index: usize, value: i64) -> Result<()> {
    let len = values.len();
    let slot = values
        .get_mut(index)
        .ok_or(Error::IndexOutOfBounds { index, len })?;
    *slot = value;
    Ok(())
}
