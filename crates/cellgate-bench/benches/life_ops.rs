//! Criterion benchmarks for generation stepping, seeding and snapshots.

use std::hint::black_box;

use cellgate_bench::{dense_engine, reference_engine, wrapped_engine};
use cellgate_core::{Generation, CAP};
use cellgate_engine::{LifeEngine, Snapshot};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Benchmark: one full tick (freeze + step) on the default 64x64 soup.
fn bench_tick_reference(c: &mut Criterion) {
    let mut engine = reference_engine(42).unwrap();
    c.bench_function("tick_reference_64x64", |b| {
        b.iter(|| black_box(engine.tick().unwrap()));
    });
}

/// Benchmark: one tick on a half-alive grid (few zero-byte skips).
fn bench_tick_dense(c: &mut Criterion) {
    c.bench_function("tick_dense_64x64", |b| {
        b.iter_batched(
            || dense_engine(7).unwrap(),
            |mut engine| black_box(engine.tick().unwrap()),
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: one tick on a 63x65 torus (branching wrap path).
fn bench_tick_wrapped(c: &mut Criterion) {
    let mut engine = wrapped_engine(42).unwrap();
    c.bench_function("tick_wrapped_63x65", |b| {
        b.iter(|| black_box(engine.tick().unwrap()));
    });
}

/// Benchmark: seed 400 picks into an empty 64x64 grid.
fn bench_seed(c: &mut Criterion) {
    c.bench_function("seed_400_64x64", |b| {
        b.iter_batched(
            || {
                (
                    LifeEngine::with_dimensions(64, 64).unwrap(),
                    ChaCha8Rng::seed_from_u64(3),
                )
            },
            |(mut engine, mut rng)| black_box(engine.seed_random(400, &mut rng).unwrap()),
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: capture and encode a full snapshot.
fn bench_snapshot_record(c: &mut Criterion) {
    let engine = reference_engine(42).unwrap();
    c.bench_function("snapshot_capture_and_encode", |b| {
        b.iter(|| {
            let snap = Snapshot::capture(engine.grid(), Generation(1), CAP).unwrap();
            black_box(snap.to_record())
        });
    });
}

criterion_group!(
    benches,
    bench_tick_reference,
    bench_tick_dense,
    bench_tick_wrapped,
    bench_seed,
    bench_snapshot_record
);
criterion_main!(benches);
