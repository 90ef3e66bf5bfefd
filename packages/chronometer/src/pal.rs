//! Platform abstraction layer for the monotonic clock.
//!
//! This module allows switching between the real clock of the operating system
//! and a fake clock whose readings are controlled by tests.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
pub(crate) use real::RealPlatform;
