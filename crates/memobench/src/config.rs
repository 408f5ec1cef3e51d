//! Command-line configuration

use anyhow::{bail, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Range-sum queries over a mutable array, with and without an LRU cache
    RangeSum(RangeSumArgs),
    /// Memoized Fibonacci through the LRU and splay-tree backends
    Fibonacci(FibonacciArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RangeSumArgs {
    /// Number of array elements
    #[arg(long, default_value_t = 100_000)]
    pub array_size: usize,

    /// Number of generated queries
    #[arg(long, default_value_t = 50_000)]
    pub queries: usize,

    /// Cache capacity (number of ranges)
    #[arg(short, long, default_value_t = 1000)]
    pub capacity: usize,

    /// Share of queries that are range sums, the rest are updates
    #[arg(long, default_value_t = 0.8)]
    pub range_ratio: f64,

    /// RNG seed, random when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

impl RangeSumArgs {
    pub fn validate(&self) -> Result<()> {
        if self.array_size < 2 {
            bail!("--array-size must be at least 2, got {}", self.array_size);
        }
        if self.capacity == 0 {
            bail!("--capacity must be greater than 0");
        }
        if !(0.0..=1.0).contains(&self.range_ratio) {
            bail!("--range-ratio must be within [0, 1], got {}", self.range_ratio);
        }
        Ok(())
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct FibonacciArgs {
    /// Largest n to measure
    #[arg(long, default_value_t = 950)]
    pub max_n: u64,

    /// Distance between measured n values
    #[arg(long, default_value_t = 50)]
    pub step: u64,

    /// Calls per timed repetition
    #[arg(long, default_value_t = 100)]
    pub number: u32,

    /// Timed repetitions, the fastest one is kept
    #[arg(long, default_value_t = 3)]
    pub repeat: u32,

    /// LRU cache capacity
    #[arg(short, long, default_value_t = 1000)]
    pub capacity: usize,
}

impl FibonacciArgs {
    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            bail!("--step must be greater than 0");
        }
        if self.number == 0 || self.repeat == 0 {
            bail!("--number and --repeat must be greater than 0");
        }
        if self.capacity == 0 {
            bail!("--capacity must be greater than 0");
        }
        Ok(())
    }

    /// Measured n values: 0, step, 2*step, ... up to max_n
    pub fn n_values(&self) -> impl Iterator<Item = u64> {
        (0..=self.max_n).step_by(self.step as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["memobench", "range-sum"]);
        match args.command {
            Command::RangeSum(range) => {
                assert_eq!(range.array_size, 100_000);
                assert_eq!(range.queries, 50_000);
                assert_eq!(range.capacity, 1000);
                assert!(range.validate().is_ok());
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(!args.json);
    }

    #[test]
    fn test_fibonacci_defaults() {
        let args = Args::parse_from(["memobench", "fibonacci"]);
        match args.command {
            Command::Fibonacci(fib) => {
                let n_values: Vec<u64> = fib.n_values().collect();
                assert_eq!(n_values.len(), 20);
                assert_eq!(n_values.last(), Some(&950));
                assert_eq!(fib.capacity, 1000);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_fibonacci_flags() {
        let args = Args::parse_from([
            "memobench", "fibonacci", "--max-n", "40", "--step", "20", "--json",
        ]);
        assert!(args.json);
        match args.command {
            Command::Fibonacci(fib) => {
                assert!(fib.validate().is_ok());
                assert_eq!(fib.n_values().collect::<Vec<_>>(), vec![0, 20, 40]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_validation_rejects() {
        let fib = FibonacciArgs {
            max_n: 950,
            step: 0,
            number: 1,
            repeat: 1,
            capacity: 10,
        };
        assert!(fib.validate().is_err());

        let range = RangeSumArgs {
            array_size: 10,
            queries: 10,
            capacity: 0,
            range_ratio: 0.8,
            seed: None,
        };
        assert!(range.validate().is_err());

        let range = RangeSumArgs {
            capacity: 5,
            range_ratio: 1.5,
            ..range
        };
        assert!(range.validate().is_err());
    }
}
