//! Scoped measurement of a region of code.

use std::time::{Duration, Instant};

use crate::Chronometer;
use crate::options::Settings;

/// A measurement of the wall-clock time between its creation and its drop.
///
/// Created by [`Chronometer::measure()`] and [`Chronometer::measure_with()`]. When dropped, the
/// elapsed time is recorded under the key of the measurement and, if logging is enabled,
/// emitted to the sink. This happens exactly once, on every exit path of the scope that owns
/// the measurement, including panics.
///
/// # Examples
///
/// ```
/// use chronometer::{Chronometer, Collector};
///
/// let collector = Collector::new();
/// let chronometer = Chronometer::builder().sink(collector.clone()).build();
///
/// fn parse(chronometer: &Chronometer, input: &str) -> Result<u32, std::num::ParseIntError> {
///     let _measurement = chronometer.measure("parse");
///     let value = input.parse::<u32>()?;
///     Ok(value * 2)
/// }
///
/// assert!(parse(&chronometer, "21").is_ok());
/// assert!(parse(&chronometer, "abc").is_err());
///
/// // Both calls were measured, including the failed one.
/// assert_eq!(chronometer.durations("parse").unwrap().len(), 2);
/// assert_eq!(collector.lines().len(), 2);
/// ```
#[derive(Debug)]
#[must_use = "Measurements are taken between creation and drop"]
pub struct Measurement<'a> {
    chronometer: &'a Chronometer,
    key: String,
    settings: Settings,
    start: Instant,
    finished: bool,
}

impl<'a> Measurement<'a> {
    pub(crate) fn new(chronometer: &'a Chronometer, key: String, settings: Settings) -> Self {
        let start = chronometer.now();

        Self {
            chronometer,
            key,
            settings,
            start,
            finished: false,
        }
    }

    /// The key the duration will be recorded under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The time elapsed since the measurement started, without ending it.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.chronometer
            .now()
            .saturating_duration_since(self.start)
    }

    /// Ends the measurement now instead of at the end of the scope.
    ///
    /// Returns the recorded duration.
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

        self.chronometer
            .complete(&self.key, duration, &self.settings);

        duration
    }
}

impl Drop for Measurement<'_> {
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

    use super::*;
    use crate::pal::{FakePlatform, PlatformFacade};
    use crate::{Collector, Options};

    fn create_test_chronometer() -> (Chronometer, FakePlatform, Collector) {
        let platform = FakePlatform::new();
        let collector = Collector::new();

        let chronometer = Chronometer::builder()
            .sink(collector.clone())
            .platform(PlatformFacade::fake(platform.clone()))
            .build();

        (chronometer, platform, collector)
    }

    #[test]
    fn records_once_on_drop() {
        let (chronometer, platform, collector) = create_test_chronometer();

        {
            let _measurement = chronometer.measure("scope");
            platform.advance(Duration::from_millis(100));
        }

        assert_eq!(
            chronometer.durations("scope").unwrap(),
            vec![Duration::from_millis(100)]
        );
        assert_eq!(collector.lines(), vec!["scope took 0.10s"]);
    }

    #[test]
    fn explicit_stop_records_once() {
        let (chronometer, platform, collector) = create_test_chronometer();

        let measurement = chronometer.measure("explicit");
        platform.advance(Duration::from_millis(30));
        let duration = measurement.stop();

        platform.advance(Duration::from_millis(30));

        assert_eq!(duration, Duration::from_millis(30));
        assert_eq!(chronometer.durations("explicit").unwrap(), vec![duration]);
        assert_eq!(collector.lines().len(), 1);
    }

    #[test]
    fn elapsed_does_not_record() {
        let (chronometer, platform, _) = create_test_chronometer();

        let measurement = chronometer.measure("peek");
        platform.advance(Duration::from_millis(10));

        assert_eq!(measurement.elapsed(), Duration::from_millis(10));
        assert_eq!(measurement.key(), "peek");
        assert_eq!(chronometer.durations("peek"), None);

        drop(measurement);
        assert_eq!(chronometer.durations("peek").unwrap().len(), 1);
    }

    #[test]
    fn nested_measurements_under_same_key_are_independent() {
        let (chronometer, platform, _) = create_test_chronometer();

        {
            let _outer = chronometer.measure("nested");
            platform.advance(Duration::from_millis(10));
            {
                let _inner = chronometer.measure("nested");
                platform.advance(Duration::from_millis(5));
            }
            platform.advance(Duration::from_millis(10));
        }

        // Inner finishes first.
        assert_eq!(
            chronometer.durations("nested").unwrap(),
            vec![Duration::from_millis(5), Duration::from_millis(25)]
        );
    }

    #[test]
    fn records_when_scope_panics() {
        let (chronometer, platform, collector) = create_test_chronometer();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _measurement = chronometer.measure("unwinding");
            platform.advance(Duration::from_millis(40));
            panic!("instrumented code failed");
        }));

        assert!(result.is_err());
        assert_eq!(
            chronometer.durations("unwinding").unwrap(),
            vec![Duration::from_millis(40)]
        );
        assert_eq!(collector.lines(), vec!["unwinding took 0.04s"]);
    }

    #[test]
    fn overrides_apply_to_scope() {
        let (chronometer, platform, collector) = create_test_chronometer();

        {
            let _measurement = chronometer.measure_with("test", Options::new().precision(3));
            platform.advance(Duration::from_millis(100));
        }
        {
            let _measurement = chronometer.measure_with("quiet", Options::new().log(false));
            platform.advance(Duration::from_millis(100));
        }

        assert_eq!(collector.lines(), vec!["test took 0.100s"]);
        assert_eq!(chronometer.durations("quiet").unwrap().len(), 1);
    }
}
