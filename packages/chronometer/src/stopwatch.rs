//! One-shot timing that emits a line and keeps nothing.

use std::time::{Duration, Instant};

use crate::Options;
use crate::options::Settings;
use crate::pal::{Platform, PlatformFacade};

/// A one-shot timer that emits `"<key> took <duration>s"` when dropped and records nothing.
///
/// Use this for a quick look at how long something takes when there is no need to aggregate
/// repeated measurements. It shares the output format and the [`Options`] of
/// [`Chronometer`](crate::Chronometer) but has no state beyond its own start time.
///
/// # Examples
///
/// ```
/// use chronometer::{Collector, Options, Stopwatch};
///
/// let collector = Collector::new();
///
/// {
///     let _stopwatch = Stopwatch::start_with(
///         "startup",
///         Options::new().sink(collector.clone()).precision(1),
///     );
/// }
///
/// assert_eq!(collector.lines(), vec!["startup took 0.0s".to_string()]);
/// ```
#[derive(Debug)]
#[must_use = "Measurements are taken between creation and drop"]
pub struct Stopwatch {
    key: String,
    settings: Settings,
    platform: PlatformFacade,
    start: Instant,
    finished: bool,
}

impl Stopwatch {
    /// Starts a stopwatch that emits to standard output with the default precision.
    pub fn start(key: impl Into<String>) -> Self {
        Self::start_with(key, Options::new())
    }

    /// Starts a stopwatch with the given output settings.
    pub fn start_with(key: impl Into<String>, options: Options) -> Self {
        Self::start_on(key.into(), options, PlatformFacade::real())
    }

    fn start_on(key: String, options: Options, platform: PlatformFacade) -> Self {
        let start = platform.now();

        Self {
            key,
            settings: options.resolve(&Settings::default()),
            platform,
            start,
            finished: false,
        }
    }

    /// The key the stopwatch reports under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The time elapsed since the stopwatch started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.platform.now().saturating_duration_since(self.start)
    }

    /// Stops the stopwatch now instead of at the end of the scope, emits the line and
    /// returns the elapsed time.
    #[expect(
        clippy::must_use_candidate,
        reason = "stopping is the point of the call, the duration is a convenience"
    )]
    pub fn stop(mut self) -> Duration {
        self.finish()
    }

    fn finish(&mut self) -> Duration {
        let duration = self.elapsed();
        self.finished = true;

        self.settings.announce(&self.key, duration);

        duration
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        if !self.finished {
            self.finish();
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use static_assertions::assert_impl_all;

    use super::*;
    use crate::Collector;
    use crate::pal::FakePlatform;

    assert_impl_all!(Stopwatch: Send, Sync);

    fn start_test_stopwatch(key: &str, options: Options) -> (Stopwatch, FakePlatform) {
        let platform = FakePlatform::new();
        let stopwatch =
            Stopwatch::start_on(key.to_string(), options, PlatformFacade::fake(platform.clone()));

        (stopwatch, platform)
    }

    #[test]
    fn emits_on_drop() {
        let collector = Collector::new();

        {
            let (_stopwatch, platform) =
                start_test_stopwatch("once", Options::new().sink(collector.clone()));
            platform.advance(Duration::from_millis(250));
        }

        assert_eq!(collector.lines(), vec!["once took 0.25s"]);
    }

    #[test]
    fn explicit_stop_emits_once() {
        let collector = Collector::new();
        let (stopwatch, platform) =
            start_test_stopwatch("explicit", Options::new().sink(collector.clone()).precision(3));

        platform.advance(Duration::from_millis(100));
        assert_eq!(stopwatch.elapsed(), Duration::from_millis(100));
        assert_eq!(stopwatch.key(), "explicit");

        let duration = stopwatch.stop();

        assert_eq!(duration, Duration::from_millis(100));
        assert_eq!(collector.lines(), vec!["explicit took 0.100s"]);
    }

    #[test]
    fn emits_when_scope_panics() {
        let collector = Collector::new();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let (_stopwatch, platform) =
                start_test_stopwatch("unwinding", Options::new().sink(collector.clone()));
            platform.advance(Duration::from_millis(10));
            panic!("instrumented code failed");
        }));

        assert!(result.is_err());
        assert_eq!(collector.lines(), vec!["unwinding took 0.01s"]);
    }

    #[test]
    fn disabled_log_emits_nothing() {
        let collector = Collector::new();

        let (stopwatch, _) =
            start_test_stopwatch("silent", Options::new().sink(collector.clone()).log(false));
        drop(stopwatch);

        assert!(collector.lines().is_empty());
    }
}
