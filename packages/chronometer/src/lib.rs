#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Wall-clock timing of code regions for development and benchmarking.
//!
//! A [`Chronometer`] records how long regions of code take, under string keys, and summarizes
//! repeated measurements as mean, sample standard deviation, count and total. Completed
//! measurements can be emitted as they happen, summarized at the end, merged across worker
//! threads and exported as a table.
//!
//! The core functionality includes:
//! - [`Chronometer`] - Records durations under keys and reports on them
//! - [`Measurement`] - Measures a scope, recorded when dropped
//! - [`Options`] - Per-call overrides of precision, logging and sink
//! - [`Parameters`] and [`EchoArgs`] - Echo call arguments in the keys of wrapped functions
//! - [`Sink`] - Where formatted lines go: [`StdoutSink`], [`TracingSink`] or a [`Collector`]
//! - [`Stopwatch`] - One-shot timing that emits a line and records nothing
//!
//! This package is not meant for use in production, serving only as a development tool.
//!
//! # Scoped timing
//!
//! ```
//! use chronometer::Chronometer;
//!
//! let chronometer = Chronometer::new();
//!
//! for _ in 0..5 {
//!     let _measurement = chronometer.measure("checksum");
//!     let _sum: u64 = (0..100_000_u64).sum();
//! } // Each iteration prints "checksum took 0.00s"
//!
//! // Prints "checksum took 0.00 ± 0.00s (n=5 -> total=0.00s)"
//! chronometer.summary();
//! ```
//!
//! # Start and stop
//!
//! When the region to measure does not map to a scope, pair [`Chronometer::start()`] with
//! [`Chronometer::stop()`]. Stopping a key that was never started is an error.
//!
//! ```
//! use chronometer::Chronometer;
//!
//! let chronometer = Chronometer::builder().log(false).build();
//!
//! chronometer.start("connect");
//! // ... connect to something ...
//! let _duration = chronometer.stop("connect").unwrap();
//!
//! assert!(chronometer.stop("connect").is_err());
//! ```
//!
//! # Wrapping functions
//!
//! ```
//! use chronometer::{Chronometer, EchoArgs, Options, Parameters};
//!
//! let chronometer = Chronometer::builder().log(false).build();
//!
//! let fib = chronometer
//!     .wrap_with_args(
//!         "fib",
//!         Parameters::from_names("fib", ["n"]),
//!         EchoArgs::All,
//!         Options::new(),
//!         |(n,): (u32,)| (0..n).fold((0_u64, 1_u64), |(a, b), _| (b, a + b)).0,
//!     )
//!     .unwrap();
//!
//! assert_eq!(fib((10,)).unwrap(), 55);
//! assert_eq!(chronometer.keys(), vec!["fib (with n=10)".to_string()]);
//! ```
//!
//! # Threading
//!
//! A [`Chronometer`] can be moved between threads but not shared. Give each worker thread its
//! own chronometer and merge them with [`Chronometer::combine()`] when the workers are done.

mod arguments;
mod builder;
mod chronometer;
mod error;
mod measurement;
mod options;
mod pal;
mod sink;
mod stopwatch;
mod summary;
mod table;
mod wrap;

pub use arguments::{CallArguments, EchoArgs, Parameters};
pub use builder::{ChronometerBuilder, DEFAULT_PRECISION};
pub use chronometer::Chronometer;
pub use error::{Error, Result};
pub use measurement::Measurement;
pub use options::Options;
pub use sink::{Collector, SharedSink, Sink, StdoutSink, TracingSink};
pub use stopwatch::Stopwatch;
pub use summary::Statistics;
pub use table::{Column, Table};

const ERR_POISONED_LOCK: &str = "encountered poisoned lock - continued execution is not safe";
