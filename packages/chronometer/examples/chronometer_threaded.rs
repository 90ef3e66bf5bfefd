//! Combining the measurements of several worker threads with `chronometer`.
//!
//! Every worker owns its own chronometer. When the workers finish, their chronometers are
//! handed back to the main thread and combined into one.
//!
//! Run with: `cargo run --example chronometer_threaded`.
#![expect(
    clippy::arithmetic_side_effects,
    reason = "this is example code that does not need production-level safety"
)]

use std::thread;
use std::time::Duration;

use chronometer::{Chronometer, TracingSink};

fn main() {
    println!("=== Threaded Chronometer Example ===");
    println!();

    let workers = (1..=3_u64)
        .map(|worker| thread::spawn(move || worker_thread(worker)))
        .collect::<Vec<_>>();

    let results = workers
        .into_iter()
        .map(|worker| worker.join().expect("worker threads do not panic"))
        .collect::<Vec<_>>();

    for (index, result) in results.iter().enumerate() {
        println!("Worker {}:", index + 1);
        print!("{result}");
        println!();
    }

    let combined = Chronometer::combine(&results).expect("there is at least one worker");

    println!("=== Combined ===");
    print!("{combined}");
}

fn worker_thread(worker: u64) -> Chronometer {
    // Lines go through `tracing`. Nothing is printed as no subscriber is installed.
    let chronometer = Chronometer::builder().sink(TracingSink).build();

    for _ in 0..worker {
        chronometer.time("common_work", || {
            thread::sleep(Duration::from_millis(10 * worker));
        });
    }

    chronometer.time(format!("unique_work_{worker}"), || {
        thread::sleep(Duration::from_millis(5));
    });

    chronometer
}
