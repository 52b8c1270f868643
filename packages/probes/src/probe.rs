//! In-flight measurement of one code section.

use std::num::NonZero;
use std::time::Duration;

use new_zealand::nz;

use crate::{ProbeGuard, Store};

/// One in-flight measurement of a named section, started by [`Store::start()`] or
/// [`probe!`](crate::probe).
///
/// The measurement ends and is added to the store's totals when the probe is
/// [stopped][Self::stop]. A probe that is dropped without being stopped records nothing.
/// Use [`guard()`][Self::guard] to stop automatically at the end of a scope, including on
/// early return or unwinding.
///
/// A probe is a value: [`with_units()`][Self::with_units] returns a new probe and leaves
/// the original untouched. Every probe value that is stopped is counted as a separate
/// call, so stopping both the original and a derived probe records two calls.
///
/// # Examples
///
/// ```
/// use probes::Store;
///
/// let store = Store::new();
///
/// let items = vec![1_u8; 128];
/// let probe = store.start("checksum").with_units(items.len() as i64);
/// let _sum: u64 = items.iter().map(|&b| u64::from(b)).sum();
/// probe.stop();
///
/// let report = store.to_report();
/// let entry = report.entries().next().unwrap();
/// assert_eq!(entry.calls(), 1);
/// assert_eq!(entry.units(), 128);
/// ```
#[derive(Clone, Debug)]
#[must_use = "nothing is recorded unless the probe is stopped or turned into a guard"]
pub struct Probe {
    store: Store,
    name: String,
    start: Duration,
    units: NonZero<u64>,
}

impl Probe {
    pub(crate) fn new(store: Store, name: String) -> Self {
        let start = store.now();

        Self {
            store,
            name,
            start,
            units: nz!(1),
        }
    }

    /// Returns a probe with the same name and start time that counts `units` units.
    ///
    /// Units are a caller-defined amount of work, such as items processed, and drive the
    /// units-per-second throughput in the report. Values below 1 are treated as 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use probes::Store;
    ///
    /// let store = Store::new();
    /// let probe = store.start("batch");
    ///
    /// assert_eq!(probe.with_units(25).units(), 25);
    /// assert_eq!(probe.with_units(0).units(), 1);
    /// assert_eq!(probe.with_units(-5).units(), 1);
    ///
    /// // The original is not modified.
    /// assert_eq!(probe.units(), 1);
    /// ```
    pub fn with_units(&self, units: i64) -> Self {
        Self {
            store: self.store.clone(),
            name: self.name.clone(),
            start: self.start,
            units: u64::try_from(units)
                .ok()
                .and_then(NonZero::new)
                .unwrap_or(nz!(1)),
        }
    }

    /// The name of the section being measured.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of units this probe adds to the section when stopped.
    #[must_use]
    pub fn units(&self) -> u64 {
        self.units.get()
    }

    /// Ends the measurement and adds it to the totals of the store that started it.
    pub fn stop(self) {
        self.complete();
    }

    /// Converts the probe into a guard that stops the measurement when dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use probes::Store;
    ///
    /// fn lookup(store: &Store, key: u32) -> Option<u32> {
    ///     let _guard = store.start("lookup").guard();
    ///
    ///     if key == 0 {
    ///         return None; // Still recorded.
    ///     }
    ///
    ///     Some(key * 2)
    /// }
    ///
    /// let store = Store::new();
    /// lookup(&store, 0);
    /// lookup(&store, 7);
    ///
    /// assert_eq!(store.to_report().entries().next().unwrap().calls(), 2);
    /// ```
    pub fn guard(self) -> ProbeGuard {
        ProbeGuard::new(self)
    }

    pub(crate) fn complete(&self) {
        let elapsed = self.store.now().saturating_sub(self.start);
        self.store.record(&self.name, elapsed, self.units);
    }
}
