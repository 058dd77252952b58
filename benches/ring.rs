use criterion::{Criterion, black_box, criterion_group, criterion_main};
use keyed_ring::Ring;
use std::collections::{LinkedList, VecDeque};

fn bench_push(c: &mut Criterion) {
    let n = 1024;
    let mut group = c.benchmark_group("PushBack 1024");
    group.bench_function("std::collections::VecDeque", |b| {
        b.iter(|| {
            let mut d = VecDeque::new();
            for i in 0..n {
                d.push_back((black_box(i as u32), i as u32));
            }
            d
        })
    });

    group.bench_function("std::collections::LinkedList", |b| {
        b.iter(|| {
            let mut l = LinkedList::new();
            for i in 0..n {
                l.push_back((black_box(i as u32), i as u32));
            }
            l
        })
    });

    group.bench_function("Ring<u32, u32>", |b| {
        b.iter(|| {
            let mut r: Ring<u32, u32> = Ring::new();
            for i in 0..n {
                r.push_back(black_box(i as u32), i as u32);
            }
            r
        })
    });

    group.bench_function("Ring<u32, u32, u16>", |b| {
        b.iter(|| {
            let mut r: Ring<u32, u32, u16> = Ring::new();
            for i in 0..n {
                r.push_back(black_box(i as u32), i as u32);
            }
            r
        })
    });
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pop/Push churn (free-list reuse)");
    let mut ring: Ring<u32, u32> = (0..256).map(|i| (i, i)).collect();
    group.bench_function("Ring pop_front + push_back", |b| {
        b.iter(|| {
            for i in 0..256u32 {
                ring.pop_front();
                ring.push_back(black_box(i), i);
            }
        })
    });
    group.finish();
}

fn bench_cursor(c: &mut Criterion) {
    let ring: Ring<u32, u32> = (0..1024).map(|i| (i, i)).collect();
    let mut group = c.benchmark_group("Cursor traversal 1024");

    group.bench_function("iter()", |b| {
        b.iter(|| ring.iter().map(|(_, v)| *v as u64).sum::<u64>())
    });

    group.bench_function("step_forward", |b| {
        b.iter(|| {
            let mut cursor = ring.begin();
            let mut sum = 0u64;
            for _ in 0..ring.len() {
                sum += *cursor.value().unwrap_or(&0) as u64;
                cursor.step_forward();
            }
            sum
        })
    });

    group.bench_function("offset(-7001)", |b| {
        b.iter(|| ring.begin().offset(black_box(-7001)).position())
    });

    group.bench_function("find_key (last)", |b| {
        let from = ring.begin().position();
        let till = ring.end().position();
        b.iter(|| ring.find_key(black_box(&1023), from, till).map(|c| c.position()))
    });
    group.finish();
}

criterion_group!(benches, bench_push, bench_churn, bench_cursor);
criterion_main!(benches);
