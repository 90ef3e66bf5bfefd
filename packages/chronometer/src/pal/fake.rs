//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::pal::abstractions::Platform;

/// Fake clock whose readings only move when a test advances them.
///
/// Multiple clones of the same `FakePlatform` share the same underlying reading,
/// so a test can keep one clone and advance time while a chronometer holds another.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    origin: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl FakePlatform {
    /// Creates a new fake clock positioned at an arbitrary origin.
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Moves the clock forward by `duration`.
    ///
    /// This affects all clones of this platform.
    pub(crate) fn advance(&self, duration: Duration) {
        let mut elapsed = self
            .elapsed
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        *elapsed = elapsed
            .checked_add(duration)
            .expect("fake clock overflow indicates an unrealistic test scenario");
    }
}

impl Platform for FakePlatform {
    fn now(&self) -> Instant {
        let elapsed = *self
            .elapsed
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        self.origin
            .checked_add(elapsed)
            .expect("fake clock overflow indicates an unrealistic test scenario")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn stands_still_until_advanced() {
        let platform = FakePlatform::new();

        assert_eq!(platform.now(), platform.now());
    }

    #[test]
    fn advances_by_requested_amount() {
        let platform = FakePlatform::new();
        let before = platform.now();

        platform.advance(Duration::from_millis(150));

        assert_eq!(platform.now().duration_since(before), Duration::from_millis(150));
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();
        let before = platform2.now();

        // Advancing one clone moves the other.
        platform1.advance(Duration::from_millis(100));

        assert_eq!(platform2.now().duration_since(before), Duration::from_millis(100));
    }
}
