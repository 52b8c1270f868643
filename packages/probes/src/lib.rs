#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Wall-clock timing of named code sections, aggregated into a plain-text report.
//!
//! Mark the start and end of a section of code with a probe and the package keeps, per
//! section name, the number of calls, the total elapsed time and a caller-defined unit count
//! (such as items processed). The totals can be printed as a table at any time.
//!
//! The core types are:
//! - [`Store`] - Holds the totals of all sections and produces reports
//! - [`Probe`] - One in-flight measurement, stopped explicitly
//! - [`ProbeGuard`] - Stops a probe when it goes out of scope
//! - [`Report`] - Snapshot of the totals, sorted by total time
//! - [`ReportStyle`] - Layout options for the textual report
//!
//! This package is meant for development-time investigation of where time goes. It keeps
//! running totals only: no histograms, no nesting and no export to telemetry systems.
//!
//! # Simple usage
//!
//! ```
//! use probes::Store;
//!
//! let store = Store::new();
//!
//! for _ in 0..3 {
//!     let _guard = store.measure("parse_input");
//!     // Work measured here.
//! }
//!
//! store.print_report();
//! ```
//!
//! # Throughput
//!
//! Attach a unit count to a probe to see units per second in addition to calls per second:
//!
//! ```
//! use probes::Store;
//!
//! let store = Store::new();
//! let batch = vec![0_u64; 1000];
//!
//! let probe = store.start("sum_batch").with_units(1000);
//! let _total: u64 = batch.iter().sum();
//! probe.stop();
//!
//! assert_eq!(store.to_report().entries().next().unwrap().units(), 1000);
//! ```
//!
//! # Naming sections after functions
//!
//! The [`probe!`] macro names the section after the function it is called from:
//!
//! ```
//! use probes::{Store, probe};
//!
//! fn handle_request(store: &Store) {
//!     let _guard = probe!(store).guard();
//!     // Work measured here.
//! }
//!
//! let store = Store::new();
//! handle_request(&store);
//! ```
//!
//! # Threading
//!
//! A [`Store`] can be shared between threads, either by reference or by cloning it (clones
//! share the same totals). Probes can be started and stopped concurrently on any thread;
//! every completion is added under a single lock, so no measurement is lost.
//!
//! # Diagnostics
//!
//! The package emits `tracing` events: `debug` when a section receives its first measurement
//! or a report snapshot is taken and `trace` for every completed probe. No subscriber is
//! installed by the package.

mod naming;
mod pal;
mod probe;
mod probe_guard;
mod report;
mod report_style;
mod section_metrics;
mod store;

pub use naming::UNKNOWN_SECTION;
pub use probe::Probe;
pub use probe_guard::ProbeGuard;
pub use report::{Report, ReportEntry};
pub use report_style::ReportStyle;
pub(crate) use section_metrics::SectionMetrics;
pub use store::Store;

pub(crate) const ERR_POISONED_LOCK: &str =
    "encountered poisoned lock - section totals may be partially updated and cannot be trusted";

// Used by macro expansions in other crates. Not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use crate::naming::section_name_from_marker;
}
