//! # Coordinator Benchmarks
//!
//! Performance benchmarks for semicong-core runs and queries.
//!
//! Run with: `cargo bench -p semicong-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use semicong_core::{CongruenceKind, CongruenceSpec, ToyCongruence, ToyRewriter, Word};
use std::hint::black_box;

/// Monogenic semigroup `a^(period + 1) = a` with `period` classes.
fn cyclic(period: usize) -> ToyCongruence {
    let spec = CongruenceSpec::new(
        CongruenceKind::TwoSided,
        1,
        vec![(Word::new(vec![0; period + 1]), Word::new(vec![0]))],
        vec![],
    );
    ToyCongruence::new(spec, ToyRewriter::new()).expect("valid spec")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_unbounded_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("unbounded_run");

    for period in [16, 64, 256].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(period), period, |b, &period| {
            b.iter(|| {
                let mut cong = cyclic(period);
                cong.run();
                black_box(cong.nr_classes())
            });
        });
    }

    group.finish();
}

fn bench_bounded_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_runs");

    for steps in [1, 8, 64].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(steps), steps, |b, &steps| {
            b.iter(|| {
                let mut cong = cyclic(256);
                while !cong.is_done() {
                    cong.run_steps(steps);
                }
                black_box(cong.nr_classes())
            });
        });
    }

    group.finish();
}

fn bench_current_equals(c: &mut Criterion) {
    let mut group = c.benchmark_group("current_equals");

    for len in [100, 1000, 10000].iter() {
        let mut cong = cyclic(7);
        cong.init();
        let lhs = Word::new(vec![0; *len]);
        let rhs = Word::new(vec![0; len + 7]);

        group.bench_with_input(BenchmarkId::from_parameter(len), len, |b, _| {
            b.iter(|| black_box(cong.current_equals(&lhs, &rhs)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_unbounded_run,
    bench_bounded_runs,
    bench_current_equals,
);

criterion_main!(benches);
