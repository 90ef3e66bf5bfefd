//! Benchmarks to measure the overhead of `chronometer` bookkeeping itself.
//!
//! Every measurement here times an empty region, so what is measured is the cost of
//! reading the clock, recording the duration and resolving the output settings.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::time::Duration;

use chronometer::{Chronometer, EchoArgs, Options, Parameters, Stopwatch};
use criterion::{Criterion, criterion_group, criterion_main};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("chronometer_overhead");

    group.bench_function("baseline_empty", |b| {
        b.iter(|| {
            black_box(());
        });
    });

    // Logging is disabled throughout so that stdout does not dominate the results.
    let chronometer = Chronometer::builder().log(false).build();

    group.bench_function("measure_empty", |b| {
        b.iter(|| {
            let _measurement = chronometer.measure("measure_empty");
            black_box(());
        });
        chronometer.reset();
    });

    group.bench_function("measure_with_options_empty", |b| {
        b.iter(|| {
            let _measurement =
                chronometer.measure_with("measure_with_options_empty", Options::new().precision(4));
            black_box(());
        });
        chronometer.reset();
    });

    group.bench_function("start_stop_empty", |b| {
        b.iter(|| {
            chronometer.start("start_stop_empty");
            black_box(chronometer.stop("start_stop_empty")).unwrap();
        });
        chronometer.reset();
    });

    group.bench_function("record", |b| {
        b.iter(|| {
            chronometer.record("record", black_box(Duration::from_millis(1)));
        });
        chronometer.reset();
    });

    {
        let wrapped = chronometer.wrap("wrap_empty", |()| black_box(()));
        group.bench_function("wrap_empty", |b| {
            b.iter(|| wrapped(()));
        });
    }
    chronometer.reset();

    {
        let wrapped = chronometer
            .wrap_with_args(
                "wrap_with_args_empty",
                Parameters::from_names("empty", ["a", "b"]),
                EchoArgs::All,
                Options::new(),
                |(a, b): (u32, u32)| black_box(a.wrapping_add(b)),
            )
            .unwrap();
        group.bench_function("wrap_with_args_empty", |b| {
            b.iter(|| wrapped(black_box((1, 2))).unwrap());
        });
    }
    chronometer.reset();

    group.bench_function("stopwatch_silent", |b| {
        b.iter(|| {
            let _stopwatch = Stopwatch::start_with("stopwatch_silent", Options::new().log(false));
            black_box(());
        });
    });

    group.finish();
}
