use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use foldhash::HashMap;
use tracing::{debug, trace};

use crate::options::Settings;
use crate::pal::{Platform, PlatformFacade};
use crate::{ChronometerBuilder, Error, Measurement, Options, Result, Statistics, Table};

/// Records wall-clock durations under string keys and summarizes them.
///
/// Every key owns an ordered sequence of recorded durations. Durations are added by scoped
/// measurements ([`measure()`](Self::measure), [`time()`](Self::time)), by explicit
/// [`start()`](Self::start) and [`stop()`](Self::stop) pairs, by wrapped functions
/// ([`wrap()`](Self::wrap), [`wrap_with_args()`](Self::wrap_with_args)) or directly
/// via [`record()`](Self::record).
///
/// A completed measurement is emitted to the configured [`Sink`](crate::Sink) right away unless
/// logging is disabled, in which case it is only recorded. Either way, it contributes to
/// [`summary()`](Self::summary), [`statistics()`](Self::statistics) and [`export()`](Self::export).
///
/// # Examples
///
/// ```
/// use std::thread;
/// use std::time::Duration;
///
/// use chronometer::{Chronometer, Collector};
///
/// let collector = Collector::new();
/// let chronometer = Chronometer::builder()
///     .sink(collector.clone())
///     .log(false)
///     .build();
///
/// for _ in 0..3 {
///     let _measurement = chronometer.measure("sleeping");
///     thread::sleep(Duration::from_millis(1));
/// }
///
/// chronometer.summary();
///
/// let lines = collector.lines();
/// assert_eq!(lines.len(), 1);
/// assert!(lines[0].starts_with("sleeping took "));
/// ```
///
/// # Threading
///
/// A chronometer is meant to be used from one thread of control at a time. It can be moved to
/// another thread but not shared between threads. To measure work on several threads, give each
/// thread its own chronometer and [`combine()`](Self::combine) them afterwards.
#[derive(Debug)]
pub struct Chronometer {
    state: RefCell<State>,
    settings: Settings,
    platform: PlatformFacade,
}

#[derive(Debug, Default)]
struct State {
    // In the order the keys were first seen.
    series: Vec<Series>,
    index: HashMap<String, usize>,

    pending_starts: HashMap<String, VecDeque<Instant>>,
}

#[derive(Clone, Debug)]
struct Series {
    key: String,
    durations: Vec<Duration>,
}

impl State {
    fn series_mut(&mut self, key: &str) -> &mut Vec<Duration> {
        let position = if let Some(&position) = self.index.get(key) {
            position
        } else {
            let position = self.series.len();
            self.series.push(Series {
                key: key.to_string(),
                durations: Vec::new(),
            });
            self.index.insert(key.to_string(), position);
            position
        };

        &mut self
            .series
            .get_mut(position)
            .expect("index only holds positions of existing series")
            .durations
    }

    fn series(&self, key: &str) -> Option<&Series> {
        self.index
            .get(key)
            .and_then(|&position| self.series.get(position))
    }
}

impl Chronometer {
    /// Creates a chronometer that emits to standard output with two fractional digits and
    /// logs every completed measurement.
    ///
    /// Use [`builder()`](Self::builder) to configure other defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts configuring a new chronometer.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronometer::{Chronometer, TracingSink};
    ///
    /// let chronometer = Chronometer::builder()
    ///     .sink(TracingSink)
    ///     .precision(3)
    ///     .log(false)
    ///     .build();
    /// ```
    pub fn builder() -> ChronometerBuilder {
        ChronometerBuilder::new()
    }

    pub(crate) fn from_parts(settings: Settings, platform: PlatformFacade) -> Self {
        Self {
            state: RefCell::new(State::default()),
            settings,
            platform,
        }
    }

    /// Creates an empty chronometer with the same configuration as this one.
    fn empty_like(&self) -> Self {
        Self::from_parts(self.settings.clone(), self.platform.clone())
    }

    pub(crate) fn now(&self) -> Instant {
        self.platform.now()
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Starts a scoped measurement that is recorded under `key` when the returned
    /// [`Measurement`] is dropped.
    ///
    /// The duration is recorded on every exit path of the scope, including early returns,
    /// `?` propagation and panics.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronometer::Chronometer;
    ///
    /// let chronometer = Chronometer::new();
    /// {
    ///     let _measurement = chronometer.measure("checksum");
    ///     let _sum: u64 = (0..10_000_u64).sum();
    /// } // Prints "checksum took 0.00s"
    /// ```
    pub fn measure(&self, key: impl Into<String>) -> Measurement<'_> {
        self.measure_resolved(key.into(), self.settings.clone())
    }

    /// Like [`measure()`](Self::measure) but with per-call overrides of the output settings.
    pub fn measure_with(&self, key: impl Into<String>, options: Options) -> Measurement<'_> {
        self.measure_resolved(key.into(), options.resolve(&self.settings))
    }

    pub(crate) fn measure_resolved(&self, key: String, settings: Settings) -> Measurement<'_> {
        Measurement::new(self, key, settings)
    }

    /// Measures one call of `f` under `key` and returns its result.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronometer::Chronometer;
    ///
    /// let chronometer = Chronometer::builder().log(false).build();
    ///
    /// let sum = chronometer.time("sum", || (0..100_u32).sum::<u32>());
    ///
    /// assert_eq!(sum, 4950);
    /// assert_eq!(chronometer.durations("sum").unwrap().len(), 1);
    /// ```
    pub fn time<R>(&self, key: impl Into<String>, f: impl FnOnce() -> R) -> R {
        let _measurement = self.measure(key);
        f()
    }

    /// Like [`time()`](Self::time) but with per-call overrides of the output settings.
    pub fn time_with<R>(&self, key: impl Into<String>, options: Options, f: impl FnOnce() -> R) -> R {
        let _measurement = self.measure_with(key, options);
        f()
    }

    /// Starts a timer under `key`, to be ended by a later [`stop()`](Self::stop) with the
    /// same key.
    ///
    /// Any number of timers can be open under the same key at the same time. Each stop ends
    /// the oldest open timer of its key.
    pub fn start(&self, key: &str) {
        let now = self.now();

        let mut state = self.state.borrow_mut();
        let pending = state.pending_starts.entry(key.to_string()).or_default();
        pending.push_back(now);

        trace!(key, pending = pending.len(), "timer started");
    }

    /// Ends the oldest open timer under `key`, records its duration and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotStarted`] if there is no open timer under `key`. Nothing is
    /// recorded in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronometer::{Chronometer, Error};
    ///
    /// let chronometer = Chronometer::builder().log(false).build();
    ///
    /// chronometer.start("load");
    /// chronometer.stop("load").unwrap();
    ///
    /// assert!(matches!(chronometer.stop("load"), Err(Error::NotStarted { .. })));
    /// ```
    pub fn stop(&self, key: &str) -> Result<Duration> {
        self.stop_resolved(key, &self.settings)
    }

    /// Like [`stop()`](Self::stop) but with per-call overrides of the output settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotStarted`] if there is no open timer under `key`.
    pub fn stop_with(&self, key: &str, options: Options) -> Result<Duration> {
        self.stop_resolved(key, &options.resolve(&self.settings))
    }

    fn stop_resolved(&self, key: &str, settings: &Settings) -> Result<Duration> {
        let end = self.now();

        let start = self
            .state
            .borrow_mut()
            .pending_starts
            .get_mut(key)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| Error::NotStarted {
                key: key.to_string(),
            })?;

        let duration = end.saturating_duration_since(start);
        self.complete(key, duration, settings);

        Ok(duration)
    }

    /// Records an externally measured duration under `key`.
    ///
    /// The duration is emitted to the sink just like a completed measurement.
    pub fn record(&self, key: &str, duration: Duration) {
        self.complete(key, duration, &self.settings);
    }

    /// Like [`record()`](Self::record) but with per-call overrides of the output settings.
    pub fn record_with(&self, key: &str, duration: Duration, options: Options) {
        self.complete(key, duration, &options.resolve(&self.settings));
    }

    /// Appends a completed measurement and announces it.
    pub(crate) fn complete(&self, key: &str, duration: Duration, settings: &Settings) {
        // The borrow ends before the sink is called, so sinks may use the chronometer.
        self.state.borrow_mut().series_mut(key).push(duration);

        debug!(key, duration_secs = duration.as_secs_f64(), "duration recorded");

        settings.announce(key, duration);
    }

    /// The number of timers open under `key`.
    #[must_use]
    pub fn pending(&self, key: &str) -> usize {
        self.state
            .borrow()
            .pending_starts
            .get(key)
            .map_or(0, VecDeque::len)
    }

    /// The keys that have recorded durations, in the order of their first recorded duration.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.state
            .borrow()
            .series
            .iter()
            .map(|series| series.key.clone())
            .collect()
    }

    /// A copy of the durations recorded under `key`, oldest first.
    ///
    /// Returns `None` if no duration was ever recorded under the key.
    #[must_use]
    pub fn durations(&self, key: &str) -> Option<Vec<Duration>> {
        self.state
            .borrow()
            .series(key)
            .map(|series| series.durations.clone())
    }

    /// Summary statistics of the durations recorded under `key`.
    ///
    /// Returns `None` if no duration was ever recorded under the key.
    #[must_use]
    pub fn statistics(&self, key: &str) -> Option<Statistics> {
        self.state
            .borrow()
            .series(key)
            .map(|series| Statistics::from_durations(&series.durations))
    }

    /// Whether nothing has been recorded since creation or the last [`reset()`](Self::reset).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().series.is_empty()
    }

    /// Emits one summary line per key to the sink.
    ///
    /// The line depends on how many durations the key has:
    ///
    /// * one: `"<key> took <duration>s"`
    /// * more: `"<key> took <mean> ± <stdev>s (n=<count> -> total=<total>s)"`, using the
    ///   sample standard deviation.
    ///
    /// Summary lines are emitted even if logging of individual measurements is disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use chronometer::{Chronometer, Collector, Options};
    ///
    /// let collector = Collector::new();
    /// let chronometer = Chronometer::builder()
    ///     .sink(collector.clone())
    ///     .log(false)
    ///     .build();
    ///
    /// chronometer.record("test", Duration::from_millis(100));
    /// chronometer.record("test", Duration::from_millis(300));
    /// chronometer.record("test2", Duration::from_millis(200));
    ///
    /// chronometer.summary_with(Options::new().precision(1));
    ///
    /// assert_eq!(
    ///     collector.lines(),
    ///     vec![
    ///         "test took 0.2 ± 0.1s (n=2 -> total=0.4s)".to_string(),
    ///         "test2 took 0.2s".to_string(),
    ///     ]
    /// );
    /// ```
    pub fn summary(&self) {
        self.summary_resolved(&self.settings);
    }

    /// Like [`summary()`](Self::summary) but with per-call overrides of the output settings.
    ///
    /// The `log` override has no effect here.
    pub fn summary_with(&self, options: Options) {
        self.summary_resolved(&options.resolve(&self.settings));
    }

    fn summary_resolved(&self, settings: &Settings) {
        for line in self.summary_lines_resolved(settings.precision) {
            settings.sink.emit(&line);
        }
    }

    /// Returns the lines [`summary()`](Self::summary) would emit, using the default precision.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        self.summary_lines_resolved(self.settings.precision)
    }

    fn summary_lines_resolved(&self, precision: usize) -> Vec<String> {
        self.state
            .borrow()
            .series
            .iter()
            .map(|series| {
                Statistics::from_durations(&series.durations).summary_line(&series.key, precision)
            })
            .collect()
    }

    /// Appends every duration recorded by `other` to the durations of this chronometer.
    ///
    /// Keys only known to `other` are added after the existing keys. For shared keys, the
    /// durations of `other` come after the existing ones. Open timers are not merged and
    /// `other` is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use chronometer::Chronometer;
    ///
    /// let a = Chronometer::builder().log(false).build();
    /// let b = Chronometer::builder().log(false).build();
    ///
    /// a.record("step", Duration::from_millis(1));
    /// b.record("step", Duration::from_millis(2));
    ///
    /// a.merge(&b);
    ///
    /// assert_eq!(
    ///     a.durations("step").unwrap(),
    ///     vec![Duration::from_millis(1), Duration::from_millis(2)]
    /// );
    /// assert_eq!(b.durations("step").unwrap(), vec![Duration::from_millis(2)]);
    /// ```
    pub fn merge(&self, other: &Self) {
        // Snapshot first, so merging a chronometer into itself does not overlap borrows.
        let incoming = other.state.borrow().series.clone();

        let mut state = self.state.borrow_mut();
        for series in &incoming {
            state.series_mut(&series.key).extend_from_slice(&series.durations);
        }

        debug!(keys = incoming.len(), "merged durations");
    }

    /// Creates a new chronometer holding the durations of all `chronometers`, merged in order.
    ///
    /// The new chronometer takes its configuration from the first input. The inputs are not
    /// modified. This is the reduction step when each worker thread measures with its own
    /// chronometer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NothingToCombine`] if `chronometers` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::thread;
    /// use std::time::Duration;
    ///
    /// use chronometer::Chronometer;
    ///
    /// let workers = (0..3)
    ///     .map(|_| {
    ///         thread::spawn(|| {
    ///             let chronometer = Chronometer::builder().log(false).build();
    ///             chronometer.time("work", || thread::sleep(Duration::from_millis(1)));
    ///             chronometer
    ///         })
    ///     })
    ///     .collect::<Vec<_>>();
    ///
    /// let results = workers
    ///     .into_iter()
    ///     .map(|worker| worker.join().unwrap())
    ///     .collect::<Vec<_>>();
    ///
    /// let combined = Chronometer::combine(&results).unwrap();
    /// assert_eq!(combined.durations("work").unwrap().len(), 3);
    /// ```
    pub fn combine<'a>(chronometers: impl IntoIterator<Item = &'a Self>) -> Result<Self> {
        let mut chronometers = chronometers.into_iter();

        let first = chronometers.next().ok_or(Error::NothingToCombine)?;

        let combined = first.empty_like();
        combined.merge(first);

        let mut count = 1_usize;
        for chronometer in chronometers {
            combined.merge(chronometer);
            count = count.saturating_add(1);
        }

        debug!(count, "combined chronometers");

        Ok(combined)
    }

    /// Exports the recorded durations as a table with one equally long column per key.
    ///
    /// Shorter columns are padded with `None`. A chronometer without keys exports an empty
    /// table.
    #[must_use]
    pub fn export(&self) -> Table {
        let state = self.state.borrow();

        let table = Table::from_ragged(
            state
                .series
                .iter()
                .map(|series| (series.key.as_str(), series.durations.as_slice())),
            self.settings.precision,
        );

        trace!(
            columns = table.columns().len(),
            rows = table.row_count(),
            "exported durations"
        );

        table
    }

    /// Forgets all keys, durations and open timers. The configuration is kept.
    pub fn reset(&self) {
        *self.state.borrow_mut() = State::default();

        debug!("chronometer reset");
    }
}

impl Default for Chronometer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Chronometer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.summary_lines() {
            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}
