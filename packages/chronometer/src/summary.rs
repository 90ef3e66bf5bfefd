//! Summary statistics and the human-readable lines derived from them.

use std::time::Duration;

/// Summary statistics over the durations recorded under one key.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use chronometer::Chronometer;
///
/// let chronometer = Chronometer::builder().log(false).build();
/// chronometer.record("query", Duration::from_millis(100));
/// chronometer.record("query", Duration::from_millis(300));
///
/// let stats = chronometer.statistics("query").unwrap();
/// assert_eq!(stats.count(), 2);
/// assert_eq!(stats.total(), Duration::from_millis(400));
/// assert_eq!(stats.mean(), Some(Duration::from_millis(200)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Statistics {
    count: usize,
    total_secs: f64,
    mean_secs: Option<f64>,
    stdev_secs: Option<f64>,
}

impl Statistics {
    /// Calculates the statistics of a sequence of durations.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "sample counts are far below the point where f64 loses integer precision"
    )]
    pub fn from_durations(durations: &[Duration]) -> Self {
        let count = durations.len();
        let total_secs: f64 = durations.iter().map(Duration::as_secs_f64).sum();

        let mean_secs = (count > 0).then(|| total_secs / count as f64);

        // Sample standard deviation is undefined for fewer than two values.
        let stdev_secs = match (mean_secs, count) {
            (Some(mean), 2..) => {
                let squared_deviations: f64 = durations
                    .iter()
                    .map(|d| (d.as_secs_f64() - mean).powi(2))
                    .sum();

                Some((squared_deviations / count.saturating_sub(1) as f64).sqrt())
            }
            _ => None,
        };

        Self {
            count,
            total_secs,
            mean_secs,
            stdev_secs,
        }
    }

    /// The number of recorded durations.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The sum of all recorded durations.
    #[must_use]
    pub fn total(&self) -> Duration {
        Duration::from_secs_f64(self.total_secs)
    }

    /// The arithmetic mean, or `None` if nothing was recorded.
    #[must_use]
    pub fn mean(&self) -> Option<Duration> {
        self.mean_secs.map(Duration::from_secs_f64)
    }

    /// The Bessel-corrected sample standard deviation, or `None` if fewer than two
    /// durations were recorded.
    #[must_use]
    pub fn standard_deviation(&self) -> Option<Duration> {
        self.stdev_secs.map(Duration::from_secs_f64)
    }

    /// Formats the summary line for these statistics under the given key.
    pub(crate) fn summary_line(&self, key: &str, precision: usize) -> String {
        match (self.mean_secs, self.stdev_secs) {
            (None, _) => format!("{key} has no durations recorded"),
            (Some(single), None) => format!("{key} took {single:.precision$}s"),
            (Some(mean), Some(stdev)) => format!(
                "{key} took {mean:.precision$} ± {stdev:.precision$}s (n={count} -> total={total:.precision$}s)",
                count = self.count,
                total = self.total_secs,
            ),
        }
    }
}

/// Formats a duration as seconds with the given number of fractional digits.
pub(crate) fn format_seconds(duration: Duration, precision: usize) -> String {
    format!("{:.precision$}", duration.as_secs_f64())
}

/// The line announcing a single completed measurement.
pub(crate) fn took_line(key: &str, duration: Duration, precision: usize) -> String {
    format!("{key} took {}s", format_seconds(duration, precision))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn millis(values: &[u64]) -> Vec<Duration> {
        values.iter().copied().map(Duration::from_millis).collect()
    }

    #[test]
    fn empty_sequence_has_no_mean() {
        let stats = Statistics::from_durations(&[]);

        assert_eq!(stats.count(), 0);
        assert_eq!(stats.total(), Duration::ZERO);
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.standard_deviation(), None);
        assert_eq!(stats.summary_line("idle", 2), "idle has no durations recorded");
    }

    #[test]
    fn single_value_skips_standard_deviation() {
        let durations = millis(&[200]);
        let stats = Statistics::from_durations(&durations);

        assert_eq!(stats.count(), 1);
        assert_eq!(stats.mean(), Some(Duration::from_millis(200)));
        assert_eq!(stats.standard_deviation(), None);
        assert_eq!(stats.summary_line("test2", 1), "test2 took 0.2s");
    }

    #[test]
    fn multiple_values_use_sample_standard_deviation() {
        let durations = millis(&[100, 300]);
        let stats = Statistics::from_durations(&durations);

        // sqrt(((0.1 - 0.2)^2 + (0.3 - 0.2)^2) / (2 - 1)) = 0.1414...
        let stdev = stats.standard_deviation().unwrap().as_secs_f64();
        assert!((stdev - 0.141_421).abs() < 1e-6);

        assert_eq!(
            stats.summary_line("test", 1),
            "test took 0.2 ± 0.1s (n=2 -> total=0.4s)"
        );
    }

    #[test]
    fn identical_values_have_zero_deviation() {
        let durations = millis(&[200, 200, 200, 200, 200]);
        let stats = Statistics::from_durations(&durations);

        assert_eq!(
            stats.summary_line("Sleeping", 2),
            "Sleeping took 0.20 ± 0.00s (n=5 -> total=1.00s)"
        );
    }

    #[test]
    fn took_line_respects_precision() {
        assert_eq!(took_line("test", Duration::from_millis(100), 3), "test took 0.100s");
        assert_eq!(took_line("test", Duration::from_millis(1234), 0), "test took 1s");
    }
}
