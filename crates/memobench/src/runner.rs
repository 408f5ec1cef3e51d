//! Timed comparisons of cached and uncached workloads

use std::hint::black_box;
use std::time::Instant;

use anyhow::{bail, Result};
use memocache::{LruCache, SplayCache, StatsSnapshot};
use memowork::{CachedArray, Fibonacci, PlainArray, Query, RangeQueries};
use num_bigint_dig::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{FibonacciArgs, RangeSumArgs};
use crate::generate::generate_test_data;

/// Outcome of the range-sum comparison
#[derive(Debug, Serialize)]
pub struct RangeSumReport {
    pub seed: u64,
    pub array_size: usize,
    pub capacity: usize,
    pub range_queries: usize,
    pub updates: usize,
    pub plain_secs: f64,
    pub cached_secs: f64,
    pub improvement_pct: f64,
    pub checksum: i64,
    pub stats: StatsSnapshot,
}

/// Timing and cache usage for one Fibonacci argument
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FibonacciRow {
    pub n: u64,
    pub lru_secs: f64,
    pub splay_secs: f64,
    pub lru_stats: StatsSnapshot,
    pub splay_stats: StatsSnapshot,
    /// Splay tree height after the last timed call
    pub splay_height: usize,
}

pub fn run_range_sum(args: &RangeSumArgs) -> Result<RangeSumReport> {
    args.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, array_size = args.array_size, queries = args.queries, "Generating range-sum workload");

    let mut rng = StdRng::seed_from_u64(seed);
    let (values, queries) =
        generate_test_data(&mut rng, args.array_size, args.queries, args.range_ratio);
    let updates = queries
        .iter()
        .filter(|q| matches!(q, Query::Update { .. }))
        .count();

    let mut plain = PlainArray::new(values.clone());
    let (plain_secs, plain_checksum) = time_queries(&mut plain, &queries)?;
    debug!(plain_secs, "Uncached run finished");

    let mut cached = CachedArray::new(values, args.capacity)?;
    let (cached_secs, cached_checksum) = time_queries(&mut cached, &queries)?;
    debug!(cached_secs, "Cached run finished");

    if plain_checksum != cached_checksum {
        bail!(
            "cached results diverged from uncached results ({} != {})",
            cached_checksum,
            plain_checksum
        );
    }

    Ok(RangeSumReport {
        seed,
        array_size: args.array_size,
        capacity: args.capacity,
        range_queries: queries.len() - updates,
        updates,
        plain_secs,
        cached_secs,
        improvement_pct: improvement_pct(plain_secs, cached_secs),
        checksum: plain_checksum,
        stats: cached.stats().snapshot(),
    })
}

pub fn run_fibonacci(args: &FibonacciArgs) -> Result<Vec<FibonacciRow>> {
    args.validate()?;
    info!(max_n = args.max_n, step = args.step, number = args.number, repeat = args.repeat, "Timing Fibonacci backends");

    let mut rows = Vec::new();
    for n in args.n_values() {
        // Fresh caches per n; they stay warm across the timed calls for that n.
        let mut lru: Fibonacci<LruCache<u64, BigUint>> =
            Fibonacci::new(LruCache::new(args.capacity)?);
        let mut tree: Fibonacci<SplayCache<u64, BigUint>> = Fibonacci::new(SplayCache::new());

        let lru_secs = measure(args.number, args.repeat, || lru.compute(n));
        let splay_secs = measure(args.number, args.repeat, || tree.compute(n));
        debug!(n, lru_secs, splay_secs, "Measured");

        rows.push(FibonacciRow {
            n,
            lru_secs,
            splay_secs,
            lru_stats: lru.stats().snapshot(),
            splay_stats: tree.stats().snapshot(),
            splay_height: tree.cache().height(),
        });
    }
    Ok(rows)
}

/// `(plain - cached) / plain` as a percentage, 0 when nothing was measured
pub fn improvement_pct(plain_secs: f64, cached_secs: f64) -> f64 {
    if plain_secs > 0.0 {
        (plain_secs - cached_secs) / plain_secs * 100.0
    } else {
        0.0
    }
}

/// Run every query, returning elapsed seconds and a wrapping sum of range results
fn time_queries<Q: RangeQueries>(target: &mut Q, queries: &[Query]) -> Result<(f64, i64)> {
    let mut checksum = 0i64;
    let start = Instant::now();
    for &query in queries {
        if let Some(sum) = target.apply(query)? {
            checksum = checksum.wrapping_add(sum);
        }
    }
    Ok((start.elapsed().as_secs_f64(), checksum))
}

/// Fastest of `repeat` repetitions of `number` calls, divided by `number`
fn measure<T, F>(number: u32, repeat: u32, mut f: F) -> f64
where
    F: FnMut() -> T,
{
    let mut best = f64::INFINITY;
    for _ in 0..repeat {
        let start = Instant::now();
        for _ in 0..number {
            black_box(f());
        }
        best = best.min(start.elapsed().as_secs_f64());
    }
    best / f64::from(number)
}
