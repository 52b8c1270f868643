//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Duration;

/// Provides a monotonic clock for measuring elapsed wall-clock time.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Time elapsed since the origin of this platform instance.
    ///
    /// Only differences between two readings from the same instance are meaningful.
    /// Successive readings never decrease.
    fn now(&self) -> Duration;
}
