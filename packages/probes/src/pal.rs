//! Platform abstraction layer for wall-clock time.
//!
//! Probes read the current time through this layer so that tests can substitute a fake
//! clock whose value they control, while real use goes through `std::time::Instant`.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
