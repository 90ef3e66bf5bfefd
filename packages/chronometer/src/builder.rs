use crate::options::Settings;
use crate::pal::PlatformFacade;
use crate::{Chronometer, SharedSink};

/// Number of fractional digits used when no precision is configured.
pub const DEFAULT_PRECISION: usize = 2;

/// Configures the defaults of a new [`Chronometer`].
///
/// Obtained from [`Chronometer::builder()`]. Every setting configured here can still be
/// overridden for individual calls via [`Options`](crate::Options).
///
/// # Examples
///
/// ```
/// use chronometer::{Chronometer, Collector};
///
/// let collector = Collector::new();
///
/// let chronometer = Chronometer::builder()
///     .sink(collector.clone())
///     .precision(1)
///     .build();
///
/// chronometer.time("work", || ());
///
/// assert_eq!(collector.lines(), vec!["work took 0.0s".to_string()]);
/// ```
#[derive(Debug)]
#[must_use]
pub struct ChronometerBuilder {
    settings: Settings,
    platform: PlatformFacade,
}

impl ChronometerBuilder {
    pub(crate) fn new() -> Self {
        Self {
            settings: Settings::default(),
            platform: PlatformFacade::real(),
        }
    }

    /// Sets the sink that receives formatted lines. Defaults to [`StdoutSink`](crate::StdoutSink).
    pub fn sink(mut self, sink: impl Into<SharedSink>) -> Self {
        self.settings.sink = sink.into();
        self
    }

    /// Sets the number of fractional digits used when formatting durations.
    /// Defaults to [`DEFAULT_PRECISION`].
    pub fn precision(mut self, digits: usize) -> Self {
        self.settings.precision = digits;
        self
    }

    /// Sets whether completed measurements are emitted to the sink as they happen.
    ///
    /// When disabled, measurements are only recorded and show up in summaries and exports.
    /// Defaults to `true`.
    pub fn log(mut self, enabled: bool) -> Self {
        self.settings.log = enabled;
        self
    }

    #[cfg(test)]
    pub(crate) fn platform(mut self, platform: PlatformFacade) -> Self {
        self.platform = platform;
        self
    }

    /// Creates the chronometer.
    #[must_use]
    pub fn build(self) -> Chronometer {
        Chronometer::from_parts(self.settings, self.platform)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::Collector;

    #[test]
    fn defaults_are_two_digits_and_logging() {
        let collector = Collector::new();
        let chronometer = Chronometer::builder().sink(collector.clone()).build();

        chronometer.record("default", Duration::from_millis(1234));

        assert_eq!(collector.lines(), vec!["default took 1.23s"]);
    }

    #[test]
    fn configured_precision_applies_to_every_call() {
        let collector = Collector::new();
        let chronometer = Chronometer::builder()
            .sink(collector.clone())
            .precision(3)
            .build();

        chronometer.record("a", Duration::from_millis(1));
        chronometer.record("b", Duration::from_millis(2));

        assert_eq!(collector.lines(), vec!["a took 0.001s", "b took 0.002s"]);
    }

    #[test]
    fn disabled_log_only_records() {
        let collector = Collector::new();
        let chronometer = Chronometer::builder()
            .sink(collector.clone())
            .log(false)
            .build();

        chronometer.record("silent", Duration::from_millis(1));

        assert!(collector.lines().is_empty());
        assert_eq!(chronometer.durations("silent").unwrap().len(), 1);
    }
}
