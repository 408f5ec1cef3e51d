use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use memocache::{LruCache, SplayCache};
use memowork::{fibonacci, CachedArray, PlainArray, RangeQueries};
use num_bigint_dig::BigUint;

fn bench_range_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_sum");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    let values: Vec<i64> = (0..10_000).collect();

    group.bench_function("plain", |b| {
        let mut array = PlainArray::new(values.clone());
        let mut counter = 0usize;
        b.iter(|| {
            let low = counter % 64;
            black_box(array.range_sum(low, low + 5_000).unwrap());
            counter += 1;
        });
    });

    group.bench_function("cached", |b| {
        let mut array = CachedArray::new(values.clone(), 1000).unwrap();
        let mut counter = 0usize;
        b.iter(|| {
            let low = counter % 64;
            black_box(array.range_sum(low, low + 5_000).unwrap());
            counter += 1;
        });
    });

    group.finish();
}

fn bench_fibonacci(c: &mut Criterion) {
    let mut group = c.benchmark_group("fibonacci");
    group.sample_size(50);

    for n in [50u64, 500, 950] {
        group.bench_with_input(BenchmarkId::new("lru_fresh", n), &n, |b, &n| {
            b.iter(|| {
                let mut cache: LruCache<u64, BigUint> = LruCache::new(1000).unwrap();
                black_box(fibonacci(n, &mut cache))
            });
        });
        group.bench_with_input(BenchmarkId::new("splay_fresh", n), &n, |b, &n| {
            b.iter(|| {
                let mut cache: SplayCache<u64, BigUint> = SplayCache::new();
                black_box(fibonacci(n, &mut cache))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_range_sum, bench_fibonacci);
criterion_main!(benches);
