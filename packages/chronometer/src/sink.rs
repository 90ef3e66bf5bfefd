//! Destinations for formatted measurement lines.

use std::fmt::{self, Debug};
use std::mem;
use std::sync::{Arc, Mutex};

use crate::ERR_POISONED_LOCK;

/// A destination for human-readable measurement lines.
///
/// A chronometer hands every line it emits to a sink, one complete line per call, without
/// a trailing newline. Any `Fn(&str)` closure that is `Send + Sync` is a sink, which makes
/// it easy to route lines to a logger or to collect them.
///
/// # Examples
///
/// ```
/// use chronometer::Chronometer;
///
/// let chronometer = Chronometer::builder()
///     .sink(|line: &str| eprintln!("[timing] {line}"))
///     .build();
///
/// chronometer.start("work");
/// chronometer.stop("work").unwrap();
/// ```
pub trait Sink: Send + Sync {
    /// Emits one formatted line.
    fn emit(&self, line: &str);
}

impl<F> Sink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, line: &str) {
        self(line);
    }
}

/// A shareable, type-erased sink.
///
/// This is what chronometers and options store internally. It is cheap to clone.
#[derive(Clone)]
pub struct SharedSink {
    inner: Arc<dyn Sink>,
}

impl SharedSink {
    /// Wraps a sink so it can be shared between chronometers and calls.
    #[must_use]
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self {
            inner: Arc::new(sink),
        }
    }

    pub(crate) fn emit(&self, line: &str) {
        self.inner.emit(line);
    }
}

impl Debug for SharedSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSink").finish_non_exhaustive()
    }
}

impl Default for SharedSink {
    fn default() -> Self {
        Self::new(StdoutSink)
    }
}

impl<S> From<S> for SharedSink
where
    S: Sink + 'static,
{
    fn from(sink: S) -> Self {
        Self::new(sink)
    }
}

/// Writes every line to standard output. This is the default sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    fn emit(&self, line: &str) {
        println!("{line}");
    }
}

/// Emits every line as an `INFO` level `tracing` event with the `chronometer` target.
///
/// Use this to interleave measurements with the rest of the structured logs of an application.
/// The application is responsible for installing a subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    #[cfg_attr(test, mutants::skip)] // Requires a subscriber to observe - manually tested.
    fn emit(&self, line: &str) {
        tracing::info!(target: "chronometer", "{line}");
    }
}

/// Keeps every emitted line in memory.
///
/// Clones share the same storage, so one clone can be handed to a chronometer as its sink
/// while another is kept to inspect what was emitted.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use chronometer::{Chronometer, Collector};
///
/// let collector = Collector::new();
/// let chronometer = Chronometer::builder().sink(collector.clone()).build();
///
/// chronometer.record("parse", Duration::from_millis(250));
///
/// assert_eq!(collector.lines(), vec!["parse took 0.25s".to_string()]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Collector {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Collector {
    /// Creates a collector with no lines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all lines emitted so far, in emission order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect(ERR_POISONED_LOCK).clone()
    }

    /// Removes and returns all lines emitted so far.
    #[must_use]
    pub fn take(&self) -> Vec<String> {
        mem::take(&mut *self.lines.lock().expect(ERR_POISONED_LOCK))
    }
}

impl Sink for Collector {
    fn emit(&self, line: &str) {
        self.lines
            .lock()
            .expect(ERR_POISONED_LOCK)
            .push(line.to_string());
    }
}
