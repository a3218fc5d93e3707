//! Criterion micro-benchmarks for region, pool, and scratch operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use olympiad_arena::{text, PoolList, Region, ScratchConfig, ScratchSet, SlotPool};

/// Benchmark: 1000 small aligned allocations, then rewind.
fn bench_region_alloc_rewind(c: &mut Criterion) {
    let mut region = Region::with_capacity(1 << 20).unwrap();
    c.bench_function("region_alloc_1000_rewind", |b| {
        b.iter(|| {
            let mut temp = region.temp();
            for i in 0..1000 {
                let span = temp.alloc(24, 8).unwrap();
                black_box(span.offset() + i);
            }
        });
    });
}

/// Benchmark: push/pop cycling through a 64-slot pool.
fn bench_pool_cycle(c: &mut Criterion) {
    let mut region = Region::with_capacity(1 << 16).unwrap();
    let mut pool = SlotPool::new(&mut region, 64, 16, 8).unwrap();
    let payload = [7u8; 16];
    c.bench_function("pool_push_pop_64", |b| {
        b.iter(|| {
            let mut held = [0u32; 64];
            for slot in held.iter_mut() {
                *slot = pool.push(&mut region, &payload).unwrap();
            }
            for &slot in held.iter().rev() {
                pool.pop(&mut region, slot);
            }
        });
    });
}

/// Benchmark: pool-backed list lookups over 63 values.
fn bench_pool_list_get(c: &mut Criterion) {
    let mut region = Region::with_capacity(1 << 16).unwrap();
    let mut list = PoolList::new(&mut region, 64).unwrap();
    for v in 0..63 {
        list.push(&mut region, v).unwrap();
    }
    c.bench_function("pool_list_get_worst", |b| {
        b.iter(|| black_box(list.get(&region, black_box(0))));
    });
}

/// Benchmark: nested scratch acquisition with string building.
fn bench_scratch_nested(c: &mut Criterion) {
    let scratch = ScratchSet::new(&ScratchConfig::new(1 << 16)).unwrap();
    c.bench_function("scratch_nested_label", |b| {
        b.iter(|| {
            let mut outer = scratch.acquire(&[]).unwrap();
            let n = {
                let mut inner = scratch.acquire(&[outer.id()]).unwrap();
                let digits = text::from_u32(&mut inner, black_box(1234)).unwrap();
                inner.str(digits).unwrap().len()
            };
            let label = text::cat(&mut outer, "Torneo", "1234").unwrap();
            black_box((n, label.len()));
        });
    });
}

criterion_group!(
    benches,
    bench_region_alloc_rewind,
    bench_pool_cycle,
    bench_pool_list_get,
    bench_scratch_nested
);
criterion_main!(benches);
