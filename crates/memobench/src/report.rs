//! Result tabulation

use anyhow::Result;
use serde::Serialize;

use crate::runner::{FibonacciRow, RangeSumReport};

/// Backend with the lower mean time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Lru,
    Splay,
}

/// Aggregate view over all Fibonacci rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub lru_mean: f64,
    pub splay_mean: f64,
    pub lru_variance: f64,
    pub splay_variance: f64,
    /// `(splay_mean - lru_mean) / lru_mean * 100`
    pub splay_vs_lru_pct: f64,
    pub faster: Backend,
}

impl Summary {
    pub fn from_rows(rows: &[FibonacciRow]) -> Self {
        let lru: Vec<f64> = rows.iter().map(|r| r.lru_secs).collect();
        let splay: Vec<f64> = rows.iter().map(|r| r.splay_secs).collect();

        let (lru_mean, lru_variance) = mean_and_variance(&lru);
        let (splay_mean, splay_variance) = mean_and_variance(&splay);

        let splay_vs_lru_pct = if lru_mean > 0.0 {
            (splay_mean - lru_mean) / lru_mean * 100.0
        } else {
            0.0
        };

        Self {
            lru_mean,
            splay_mean,
            lru_variance,
            splay_variance,
            splay_vs_lru_pct,
            faster: if splay_mean < lru_mean {
                Backend::Splay
            } else {
                Backend::Lru
            },
        }
    }
}

#[derive(Serialize)]
struct FibonacciReport<'a> {
    rows: &'a [FibonacciRow],
    summary: Summary,
}

/// Mean and population variance, zeros for an empty sample
fn mean_and_variance(samples: &[f64]) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let len = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / len;
    let variance = samples.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / len;
    (mean, variance)
}

pub fn print_range_sum(report: &RangeSumReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\nRange-sum results (seed {}):", report.seed);
    println!("  Array size:              {}", report.array_size);
    println!("  Range queries / updates: {} / {}", report.range_queries, report.updates);
    println!("  Cache capacity:          {}", report.capacity);
    println!("  Time without cache:      {:.4} seconds", report.plain_secs);
    println!("  Time with cache:         {:.4} seconds", report.cached_secs);
    println!("  Performance improvement: {:.2}%", report.improvement_pct);
    println!(
        "  Cache hits / misses:     {} / {} (hit ratio {:.2})",
        report.stats.hits, report.stats.misses, report.stats.hit_ratio
    );
    println!("  Invalidations:           {}", report.stats.invalidations);
    println!("  Evictions:               {}", report.stats.evictions);
    Ok(())
}

pub fn print_fibonacci(rows: &[FibonacciRow], json: bool) -> Result<()> {
    let summary = Summary::from_rows(rows);

    if json {
        let report = FibonacciReport { rows, summary };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\nPerformance comparison:");
    println!("{}", render_table(rows));

    println!("Summary:");
    println!("  LRU mean:        {:.8} s (variance {:.2e})", summary.lru_mean, summary.lru_variance);
    println!("  Splay mean:      {:.8} s (variance {:.2e})", summary.splay_mean, summary.splay_variance);
    println!("  Splay vs LRU:    {:+.1}%", summary.splay_vs_lru_pct);
    println!(
        "  Faster backend:  {}",
        match summary.faster {
            Backend::Lru => "LRU cache",
            Backend::Splay => "splay tree",
        }
    );
    Ok(())
}

fn render_table(rows: &[FibonacciRow]) -> String {
    let mut out = format!("{:>5}  {:>16}  {:>16}\n", "n", "LRU Cache (s)", "Splay Tree (s)");
    out.push_str(&format!("{:->5}  {:->16}  {:->16}\n", "", "", ""));
    for row in rows {
        out.push_str(&format!(
            "{:>5}  {:>16.8}  {:>16.8}\n",
            row.n, row.lru_secs, row.splay_secs
        ));
    }
    out
}
