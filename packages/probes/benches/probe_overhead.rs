//! Benchmarks to measure the overhead of `probes` logic itself.
//!
//! Every benchmarked probe is empty: it measures nothing but the cost of starting and
//! stopping the probe, which includes taking the store lock.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use probes::{Store, probe};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("probes_overhead");

    group.bench_function("baseline_empty", |b| {
        b.iter(|| {
            black_box(());
        });
    });

    let store = Store::new();

    group.bench_function("named_probe_empty", |b| {
        b.iter(|| {
            store.start("empty_named").stop();
        });
    });

    group.bench_function("named_probe_with_units_empty", |b| {
        b.iter(|| {
            store.start("empty_with_units").with_units(100).stop();
        });
    });

    group.bench_function("guard_empty", |b| {
        b.iter(|| {
            let _guard = store.measure("empty_guard");
            black_box(());
        });
    });

    group.bench_function("inferred_probe_empty", |b| {
        b.iter(|| {
            probe!(store).stop();
        });
    });

    // Distinct names grow the map, so this shows the cost of a lookup in a larger store.
    for i in 0..1000 {
        store.start(format!("filler_{i}")).stop();
    }

    group.bench_function("named_probe_empty_1000_sections", |b| {
        b.iter(|| {
            store.start("empty_named").stop();
        });
    });

    group.bench_function("to_report_1000_sections", |b| {
        b.iter(|| black_box(store.to_report()));
    });

    group.finish();
}
