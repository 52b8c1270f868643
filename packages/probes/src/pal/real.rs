//! Real platform implementation backed by the standard library monotonic clock.

use std::time::{Duration, Instant};

use crate::pal::abstractions::Platform;

#[derive(Clone, Debug)]
pub(crate) struct RealPlatform {
    origin: Instant,
}

impl RealPlatform {
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Platform for RealPlatform {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
