use std::fmt;
use std::num::NonZero;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use foldhash::{HashMap, HashMapExt};
use tracing::{debug, trace};

use crate::pal::{Platform, PlatformFacade};
use crate::{ERR_POISONED_LOCK, Probe, ProbeGuard, Report, SectionMetrics};

/// Aggregates measurements of named code sections and reports on them.
///
/// Every completed [`Probe`] adds its elapsed time, one call and its unit count to the
/// totals kept for its section name. All access to the totals goes through a single lock,
/// so probes may be started and stopped concurrently on any thread.
///
/// Cloning a `Store` is cheap and the clone shares the same totals. Create separate stores
/// with [`Store::new()`] to keep measurements apart, e.g. one per test.
///
/// # Examples
///
/// ```
/// use probes::Store;
///
/// let store = Store::new();
///
/// for _ in 0..3 {
///     let _guard = store.measure("parse_input");
///     // Work measured here.
/// }
///
/// let probe = store.start("load_batch").with_units(64);
/// // Process 64 items.
/// probe.stop();
///
/// store.print_report();
/// ```
#[derive(Clone, Debug)]
pub struct Store {
    sections: Arc<Mutex<HashMap<String, SectionMetrics>>>,
    platform: PlatformFacade,
}

impl Store {
    /// Creates an empty store measuring wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_platform(PlatformFacade::real())
    }

    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self {
            sections: Arc::new(Mutex::new(HashMap::new())),
            platform,
        }
    }

    /// Starts measuring a section under an explicit name.
    ///
    /// Any string is a valid name, including the empty string. Probes with equal names
    /// contribute to the same totals.
    ///
    /// To name the section after the calling function instead, use [`probe!`](crate::probe).
    ///
    /// # Examples
    ///
    /// ```
    /// use probes::Store;
    ///
    /// let store = Store::new();
    ///
    /// let probe = store.start("checksum");
    /// // Work measured here.
    /// probe.stop();
    ///
    /// assert_eq!(store.len(), 1);
    /// ```
    pub fn start(&self, name: impl Into<String>) -> Probe {
        Probe::new(self.clone(), name.into())
    }

    /// Starts measuring a section and returns a guard that stops the measurement when dropped.
    ///
    /// Equivalent to `self.start(name).guard()`.
    pub fn measure(&self, name: impl Into<String>) -> ProbeGuard {
        self.start(name).guard()
    }

    /// Takes a snapshot of the current totals for reporting.
    ///
    /// The snapshot is independent of the store. Later measurements do not affect it.
    #[must_use]
    pub fn to_report(&self) -> Report {
        let snapshot: Vec<(String, SectionMetrics)> = {
            let sections = self.sections.lock().expect(ERR_POISONED_LOCK);
            sections
                .iter()
                .map(|(name, metrics)| (name.clone(), metrics.clone()))
                .collect()
        };

        debug!(sections = snapshot.len(), "took report snapshot");

        Report::from_sections(snapshot)
    }

    /// Prints the report of all sections measured so far to stdout.
    ///
    /// Equivalent to `self.to_report().print_to_stdout()`.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_report(&self) {
        self.to_report().print_to_stdout();
    }

    /// Whether no probe has completed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.lock().expect(ERR_POISONED_LOCK).is_empty()
    }

    /// The number of distinct section names measured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.lock().expect(ERR_POISONED_LOCK).len()
    }

    pub(crate) fn now(&self) -> Duration {
        self.platform.now()
    }

    /// Adds one completed measurement to the totals of `name`.
    pub(crate) fn record(&self, name: &str, elapsed: Duration, units: NonZero<u64>) {
        let first_for_section = {
            let mut sections = self.sections.lock().expect(ERR_POISONED_LOCK);

            if let Some(metrics) = sections.get_mut(name) {
                metrics.add(elapsed, units);
                false
            } else {
                let mut metrics = SectionMetrics::default();
                metrics.add(elapsed, units);
                sections.insert(name.to_owned(), metrics);
                true
            }
        };

        if first_for_section {
            debug!(section = name, "first measurement for section");
        }

        trace!(
            section = name,
            elapsed = ?elapsed,
            units = units.get(),
            "probe stopped"
        );
    }

    #[cfg(test)]
    pub(crate) fn section(&self, name: &str) -> Option<SectionMetrics> {
        self.sections
            .lock()
            .expect(ERR_POISONED_LOCK)
            .get(name)
            .cloned()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_report())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::thread;

    use new_zealand::nz;

    use super::*;
    use crate::pal::FakePlatform;

    fn create_test_store() -> (Store, FakePlatform) {
        let fake_platform = FakePlatform::new();
        let store = Store::with_platform(PlatformFacade::fake(fake_platform.clone()));
        (store, fake_platform)
    }

    #[test]
    fn new_store_is_empty() {
        let (store, _clock) = create_test_store();

        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.to_report().is_empty());
    }

    #[test]
    fn starting_without_stopping_records_nothing() {
        let (store, clock) = create_test_store();

        let probe = store.start("never_stopped");
        clock.advance(Duration::from_millis(5));
        drop(probe);

        assert!(store.is_empty());
    }

    #[test]
    fn first_stop_makes_store_non_empty() {
        let (store, _clock) = create_test_store();

        store.start("work").stop();

        assert!(!store.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn repeated_stops_under_one_name_accumulate() {
        let (store, clock) = create_test_store();

        for millis in [10, 20, 30] {
            let probe = store.start("work");
            clock.advance(Duration::from_millis(millis));
            probe.stop();
        }

        let metrics = store.section("work").unwrap();
        assert_eq!(metrics.call_count, 3);
        assert_eq!(metrics.total_elapsed, Duration::from_millis(60));
        assert_eq!(metrics.total_units, 3);
    }

    #[test]
    fn units_accumulate_per_stop() {
        let (store, _clock) = create_test_store();

        store.start("batch").with_units(10).stop();
        store.start("batch").with_units(5).stop();
        store.start("batch").stop();

        let metrics = store.section("batch").unwrap();
        assert_eq!(metrics.call_count, 3);
        assert_eq!(metrics.total_units, 16);
    }

    #[test]
    fn empty_name_is_a_valid_key() {
        let (store, _clock) = create_test_store();

        store.start("").stop();
        store.start(String::new()).stop();

        assert_eq!(store.len(), 1);
        assert_eq!(store.section("").unwrap().call_count, 2);
    }

    #[test]
    fn record_creates_section_lazily() {
        let (store, _clock) = create_test_store();

        store.record("direct", Duration::from_millis(7), nz!(3));

        assert_eq!(
            store.section("direct").unwrap(),
            SectionMetrics {
                total_elapsed: Duration::from_millis(7),
                call_count: 1,
                total_units: 3,
            }
        );
    }

    #[test]
    fn clones_share_totals() {
        let (store, _clock) = create_test_store();
        let clone = store.clone();

        clone.start("shared").stop();
        store.start("shared").stop();

        assert_eq!(store.section("shared").unwrap().call_count, 2);
        assert_eq!(clone.len(), 1);
    }

    #[test]
    fn separate_stores_are_isolated() {
        let (store1, _clock1) = create_test_store();
        let (store2, _clock2) = create_test_store();

        store1.start("only_in_first").stop();

        assert!(!store1.is_empty());
        assert!(store2.is_empty());
    }

    #[test]
    fn report_is_a_snapshot() {
        let (store, _clock) = create_test_store();

        store.start("work").stop();
        let report = store.to_report();
        store.start("work").stop();
        store.start("other").stop();

        assert_eq!(report.len(), 1);
        assert_eq!(report.entries().next().unwrap().calls(), 1);
    }

    #[test]
    fn concurrent_stops_lose_no_updates() {
        let (store, _clock) = create_test_store();

        thread::scope(|s| {
            for _ in 0..100 {
                s.spawn(|| store.start("contended").with_units(2).stop());
            }
        });

        let metrics = store.section("contended").unwrap();
        assert_eq!(metrics.call_count, 100);
        assert_eq!(metrics.total_units, 200);
    }

    #[test]
    fn display_matches_report_display() {
        let (store, clock) = create_test_store();

        let probe = store.start("work");
        clock.advance(Duration::from_millis(3));
        probe.stop();

        assert_eq!(store.to_string(), store.to_report().to_string());
    }

    static_assertions::assert_impl_all!(Store: Send, Sync, Clone);
}
