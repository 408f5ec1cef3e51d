//! memobench - compares memocache backends on range-sum and Fibonacci workloads

mod config;
mod generate;
mod report;
mod runner;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::config::{Args, Command};

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable with --json
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("Starting memobench v{}", env!("CARGO_PKG_VERSION"));

    match &args.command {
        Command::RangeSum(range) => {
            info!(capacity = range.capacity, "Range-sum comparison");
            let report = runner::run_range_sum(range)?;
            report::print_range_sum(&report, args.json)?;
        }
        Command::Fibonacci(fib) => {
            info!(capacity = fib.capacity, "Fibonacci comparison");
            let rows = runner::run_fibonacci(fib)?;
            report::print_fibonacci(&rows, args.json)?;
        }
    }

    Ok(())
}
