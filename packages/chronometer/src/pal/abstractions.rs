//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Instant;

/// Provides monotonic clock readings.
///
/// Readings must never go backwards and must not follow wall clock adjustments.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the current reading of the monotonic clock.
    fn now(&self) -> Instant;
}
