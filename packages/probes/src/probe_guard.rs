use crate::Probe;

/// Stops a [`Probe`] when dropped.
///
/// Created by [`Probe::guard()`] or [`Store::measure()`](crate::Store::measure). The
/// measurement covers the lifetime of the guard, so it is recorded even if the scope is
/// left through an early return or a panic.
///
/// # Examples
///
/// ```
/// use probes::Store;
///
/// let store = Store::new();
/// {
///     let _guard = store.measure("startup");
///     // Work measured here.
/// } // Recorded here.
///
/// assert!(!store.is_empty());
/// ```
#[derive(Debug)]
#[must_use = "the measurement ends when the guard is dropped; binding it to `_` ends it immediately"]
pub struct ProbeGuard {
    probe: Probe,
}

impl ProbeGuard {
    pub(crate) fn new(probe: Probe) -> Self {
        Self { probe }
    }

    /// The name of the section being measured.
    #[must_use]
    pub fn name(&self) -> &str {
        self.probe.name()
    }
}

impl Drop for ProbeGuard {
    fn drop(&mut self) {
        self.probe.complete();
    }
}
