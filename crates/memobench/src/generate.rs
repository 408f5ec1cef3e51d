//! Random workload generation

use memowork::Query;
use rand::Rng;

/// Smallest and largest generated element or update value
const VALUE_RANGE: std::ops::RangeInclusive<i64> = 1..=1000;

/// Array of `array_size` values plus `count` queries against it.
///
/// Range queries span at least two elements (`low < high`). Requires
/// `array_size >= 2`.
pub fn generate_test_data<R: Rng>(
    rng: &mut R,
    array_size: usize,
    count: usize,
    range_ratio: f64,
) -> (Vec<i64>, Vec<Query>) {
    let values = (0..array_size)
        .map(|_| rng.gen_range(VALUE_RANGE))
        .collect();

    let queries = (0..count)
        .map(|_| {
            if rng.gen_bool(range_ratio) {
                let low = rng.gen_range(0..=array_size - 2);
                let high = rng.gen_range(low + 1..=array_size - 1);
                Query::Range { low, high }
            } else {
                Query::Update {
                    index: rng.gen_range(0..array_size),
                    value: rng.gen_range(VALUE_RANGE),
                }
            }
        })
        .collect();

    (values, queries)
}
