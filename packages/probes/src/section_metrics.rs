use std::num::NonZero;
use std::time::Duration;

/// Running totals for one section name in a [`Store`](crate::Store).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SectionMetrics {
    pub(crate) total_elapsed: Duration,
    pub(crate) call_count: u64,
    pub(crate) total_units: u64,
}

impl SectionMetrics {
    /// Adds one completed measurement.
    ///
    /// Accumulation saturates instead of overflowing. Nothing here may panic because it
    /// runs while the store lock is held.
    pub(crate) fn add(&mut self, elapsed: Duration, units: NonZero<u64>) {
        self.total_elapsed = self.total_elapsed.saturating_add(elapsed);
        self.call_count = self.call_count.saturating_add(1);
        self.total_units = self.total_units.saturating_add(units.get());
    }

    /// Combines the totals of another record into this one.
    pub(crate) fn merge_from(&mut self, other: &Self) {
        self.total_elapsed = self.total_elapsed.saturating_add(other.total_elapsed);
        self.call_count = self.call_count.saturating_add(other.call_count);
        self.total_units = self.total_units.saturating_add(other.total_units);
    }
}
