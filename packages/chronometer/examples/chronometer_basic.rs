//! The main ways of measuring code with `chronometer`.
//!
//! This example shows scoped measurements, start/stop pairs, closure timing, the summary
//! report and the tabular export.
//!
//! Run with: `cargo run --example chronometer_basic`.
#![expect(
    clippy::arithmetic_side_effects,
    reason = "this is example code that does not need production-level safety"
)]

use std::hint::black_box;
use std::thread;
use std::time::Duration;

use chronometer::{Chronometer, Options};

fn main() {
    println!("=== Chronometer Example ===");
    println!();

    let chronometer = Chronometer::new();

    // Every completed measurement is printed as it happens.
    for _ in 0..3 {
        let _measurement = chronometer.measure("Sleeping");
        thread::sleep(Duration::from_millis(50));
    }

    // More digits for a single measurement.
    {
        let _measurement = chronometer.measure_with("Precise", Options::new().precision(4));
        thread::sleep(Duration::from_millis(10));
    }

    // Regions that do not map to a scope.
    chronometer.start("Counting");
    let mut sum = 0_u64;
    for i in 0..1_000_000 {
        sum += i;
    }
    black_box(sum);
    chronometer
        .stop("Counting")
        .expect("the timer was started just above");

    // Only recorded, shows up in the summary below.
    let squares = chronometer.time_with("Squares", Options::new().log(false), || {
        (0..1_000_u64).map(|x| x * x).collect::<Vec<_>>()
    });
    black_box(squares);

    println!();
    println!("=== Summary ===");
    chronometer.summary();

    println!();
    println!("=== Export ===");
    print!("{}", chronometer.export());
}
