use criterion::{Criterion, black_box, criterion_group, criterion_main};
use keyed_ring::{Ring, filter, join, shuffle, unique};

fn sample(n: u32, distinct: u32) -> Ring<u32, u64> {
    (0..n).map(|i| (i % distinct, i as u64)).collect()
}

fn bench_algorithms(c: &mut Criterion) {
    let source = sample(512, 64);
    let other = sample(256, 96);
    let mut group = c.benchmark_group("Algorithms (512 entries, 64 keys)");

    group.bench_function("filter", |b| {
        b.iter(|| filter(black_box(&source), |k| k % 2 == 0))
    });

    group.bench_function("unique (sum)", |b| {
        b.iter(|| unique(black_box(&source), |_, a, b| a + b))
    });

    group.bench_function("join", |b| {
        b.iter(|| join(black_box(&source), black_box(&other)))
    });

    group.bench_function("shuffle 3+5 x 64", |b| {
        b.iter(|| shuffle(black_box(&source), 3, black_box(&other), 5, 64))
    });
    group.finish();
}

criterion_group!(benches, bench_algorithms);
criterion_main!(benches);
