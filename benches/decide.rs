//! Benchmarks for fuzzification, inference and centroid defuzzification.
//!
//! Run with: cargo bench --bench decide

#[path = "../tests/common/mod.rs"]
mod common;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mamdani::{centroid, load_rules, Discretization, FuzzyMap};

fn bench_load_rules(c: &mut Criterion) {
    c.bench_function("load_steering_rules", |b| {
        b.iter(|| load_rules(black_box(common::STEERING_RULES)).unwrap());
    });
}

fn bench_decide(c: &mut Criterion) {
    let steering = common::Steering::new();
    let throttle = common::Throttle::new();

    c.bench_function("steering_decide", |b| {
        b.iter(|| steering.decide(black_box(20.), black_box(55.)));
    });

    // 10k samples per call
    c.bench_function("throttle_decide", |b| {
        b.iter(|| throttle.decide(black_box(45.)));
    });
}

fn bench_centroid_step(c: &mut Criterion) {
    let domain = common::rotation();
    let activations = FuzzyMap::from([(("Rotate", "low_right"), 0.6), (("Rotate", "high_right"), 0.1)]);
    let mut group = c.benchmark_group("centroid_step");

    for step in [1., 0.1, 0.01] {
        let range = Discretization::new(-50., 50., step).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(step), &range, |b, range| {
            b.iter(|| centroid(black_box(&activations), "Rotate", &domain, range));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load_rules, bench_decide, bench_centroid_step);
criterion_main!(benches);
