use std::time::Duration;

use crate::summary::took_line;
use crate::{DEFAULT_PRECISION, SharedSink};

/// Per-call overrides of the output settings of a [`Chronometer`](crate::Chronometer).
///
/// Every setting left unset falls back to the default configured on the chronometer.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use chronometer::{Chronometer, Collector, Options};
///
/// let collector = Collector::new();
/// let chronometer = Chronometer::builder().sink(collector.clone()).build();
///
/// // Silently recorded.
/// chronometer.record_with("warmup", Duration::from_millis(5), Options::new().log(false));
///
/// // Recorded and emitted with more digits than the default.
/// chronometer.record_with("steady", Duration::from_millis(5), Options::new().precision(4));
///
/// assert_eq!(collector.lines(), vec!["steady took 0.0050s".to_string()]);
/// ```
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct Options {
    precision: Option<usize>,
    log: Option<bool>,
    sink: Option<SharedSink>,
}

impl Options {
    /// Creates options that override nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of fractional digits used when formatting durations.
    pub fn precision(mut self, digits: usize) -> Self {
        self.precision = Some(digits);
        self
    }

    /// Overrides whether a completed measurement is emitted to the sink immediately.
    ///
    /// The measurement is recorded either way.
    pub fn log(mut self, enabled: bool) -> Self {
        self.log = Some(enabled);
        self
    }

    /// Overrides the sink that receives the formatted lines.
    pub fn sink(mut self, sink: impl Into<SharedSink>) -> Self {
        self.sink = Some(sink.into());
        self
    }

    pub(crate) fn resolve(self, defaults: &Settings) -> Settings {
        Settings {
            precision: self.precision.unwrap_or(defaults.precision),
            log: self.log.unwrap_or(defaults.log),
            sink: self.sink.unwrap_or_else(|| defaults.sink.clone()),
        }
    }
}

/// Fully resolved output settings, either the defaults of a chronometer or the
/// result of applying [`Options`] on top of them.
#[derive(Clone, Debug)]
pub(crate) struct Settings {
    pub(crate) precision: usize,
    pub(crate) log: bool,
    pub(crate) sink: SharedSink,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            log: true,
            sink: SharedSink::default(),
        }
    }
}

impl Settings {
    /// Emits the line announcing a completed measurement, if logging is enabled.
    pub(crate) fn announce(&self, key: &str, duration: Duration) {
        if self.log {
            self.sink.emit(&took_line(key, duration, self.precision));
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Collector;

    fn defaults(collector: &Collector) -> Settings {
        Settings {
            precision: 2,
            log: true,
            sink: SharedSink::new(collector.clone()),
        }
    }

    #[test]
    fn empty_options_keep_defaults() {
        let collector = Collector::new();
        let settings = Options::new().resolve(&defaults(&collector));

        assert_eq!(settings.precision, 2);
        assert!(settings.log);

        settings.announce("key", Duration::from_millis(1500));
        assert_eq!(collector.lines(), vec!["key took 1.50s"]);
    }

    #[test]
    fn overrides_win_over_defaults() {
        let default_collector = Collector::new();
        let override_collector = Collector::new();

        let settings = Options::new()
            .precision(0)
            .sink(override_collector.clone())
            .resolve(&defaults(&default_collector));

        settings.announce("key", Duration::from_millis(1500));

        assert!(default_collector.lines().is_empty());
        assert_eq!(override_collector.lines(), vec!["key took 2s"]);
    }

    #[test]
    fn disabled_log_emits_nothing() {
        let collector = Collector::new();
        let settings = Options::new().log(false).resolve(&defaults(&collector));

        settings.announce("key", Duration::from_secs(1));

        assert!(collector.lines().is_empty());
    }
}
