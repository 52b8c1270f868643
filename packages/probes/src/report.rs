//! Snapshots of aggregated section timings and their textual form.

use std::fmt;
use std::io;
use std::time::Duration;

use foldhash::{HashMap, HashMapExt};

use crate::report_style::COLUMNS;
use crate::{ReportStyle, SectionMetrics};

/// Snapshot of the totals of a [`Store`](crate::Store), ordered by total time, longest first.
///
/// A report is detached from the store it came from, so it can be sent to other threads,
/// kept for later or [merged][Self::merge] with reports from other stores.
///
/// The `Display` implementation renders the report as a plain-text table:
///
/// ```text
/// Aggregated Execution Time Report:
/// ------------------------------------------------------------------------------------------------------------------------------
/// Name                                                    Calls      Units      Total Time        Avg Time  Calls/sec  Units/sec
/// ------------------------------------------------------------------------------------------------------------------------------
/// load_batch                                                  2         20        40.518ms        20.259ms      49.36     493.61
/// parse_input                                                 3          3         3.004ms         1.001ms     998.67     998.67
/// ------------------------------------------------------------------------------------------------------------------------------
/// ```
///
/// A report without any sections renders as the single line `No probes to report.`.
///
/// # Examples
///
/// ```
/// use probes::Store;
///
/// let store = Store::new();
/// store.start("decode").with_units(8).stop();
///
/// let report = store.to_report();
/// for entry in report.entries() {
///     println!(
///         "{}: {} calls, {:?} total, {:.2} units/s",
///         entry.name(),
///         entry.calls(),
///         entry.total_time(),
///         entry.units_per_second()
///     );
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Report {
    // Sorted by total time, descending.
    entries: Box<[ReportEntry]>,
    style: ReportStyle,
}

/// Totals and derived rates of one section in a [`Report`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportEntry {
    name: String,
    total_time: Duration,
    calls: u64,
    units: u64,
}

impl Report {
    pub(crate) fn from_sections(
        sections: impl IntoIterator<Item = (String, SectionMetrics)>,
    ) -> Self {
        let mut entries = sections
            .into_iter()
            .map(|(name, metrics)| ReportEntry {
                name,
                total_time: metrics.total_elapsed,
                calls: metrics.call_count,
                units: metrics.total_units,
            })
            .collect::<Vec<_>>();

        // Ties keep whatever order the sections arrived in.
        entries.sort_by(|a, b| b.total_time.cmp(&a.total_time));

        Self {
            entries: entries.into_boxed_slice(),
            style: ReportStyle::default(),
        }
    }

    /// Combines two reports into a new report, as if all probes had completed in one store.
    ///
    /// Sections with the same name have their totals added up. The result uses the style
    /// of `a`.
    ///
    /// # Examples
    ///
    /// ```
    /// use probes::{Report, Store};
    ///
    /// let store1 = Store::new();
    /// let store2 = Store::new();
    ///
    /// store1.start("work").with_units(5).stop();
    /// store2.start("work").with_units(3).stop();
    ///
    /// let merged = Report::merge(&store1.to_report(), &store2.to_report());
    /// let entry = merged.entries().next().unwrap();
    ///
    /// assert_eq!(entry.calls(), 2);
    /// assert_eq!(entry.units(), 8);
    /// ```
    #[must_use]
    pub fn merge(a: &Self, b: &Self) -> Self {
        let mut sections: HashMap<String, SectionMetrics> = HashMap::new();

        for entry in a.entries.iter().chain(b.entries.iter()) {
            sections
                .entry(entry.name.clone())
                .or_default()
                .merge_from(&entry.metrics());
        }

        Self::from_sections(sections).with_style(a.style)
    }

    /// Returns the same report rendered with a different layout.
    #[must_use]
    pub fn with_style(self, style: ReportStyle) -> Self {
        Self { style, ..self }
    }

    /// The layout used by the `Display` implementation.
    #[must_use]
    pub fn style(&self) -> ReportStyle {
        self.style
    }

    /// Iterates over the sections in report order, longest total time first.
    pub fn entries(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter()
    }

    /// The number of sections in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report contains no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prints the report to stdout, preceded by an empty line.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        println!();
        print!("{self}");
    }

    /// Writes the textual form of the report to `writer`.
    ///
    /// # Errors
    ///
    /// Returns any error reported by `writer`.
    pub fn write_to(&self, mut writer: impl io::Write) -> io::Result<()> {
        write!(writer, "{self}")
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, name: &str, cells: &[String; 6]) -> fmt::Result {
        let name = self.style.fit_name(name);
        write!(f, "{name:<width$}", width = self.style.name_width())?;

        for (index, column) in self.style.columns() {
            let cell = cells.get(index).map_or("", String::as_str);
            write!(f, " {cell:>width$}", width = column.width)?;
        }

        writeln!(f)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No probes to report.");
        }

        let rule = "-".repeat(self.style.table_width());
        let titles = COLUMNS.each_ref().map(|column| column.title.to_owned());

        writeln!(f, "Aggregated Execution Time Report:")?;
        writeln!(f, "{rule}")?;
        self.write_row(f, "Name", &titles)?;
        writeln!(f, "{rule}")?;

        for entry in &self.entries {
            self.write_row(f, &entry.name, &entry.cells())?;
        }

        writeln!(f, "{rule}")
    }
}

impl ReportEntry {
    /// The section name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How many probes completed for this section.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// The sum of the unit counts of all completed probes.
    #[must_use]
    pub fn units(&self) -> u64 {
        self.units
    }

    /// The sum of the elapsed time of all completed probes.
    #[must_use]
    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    /// The mean elapsed time per call, or zero if there are no calls.
    #[must_use]
    pub fn mean(&self) -> Duration {
        self.total_time
            .as_nanos()
            .checked_div(u128::from(self.calls))
            .map_or(Duration::ZERO, |nanos| {
                Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
            })
    }

    /// Calls per second of total time, or zero if no time has been measured.
    #[must_use]
    pub fn calls_per_second(&self) -> f64 {
        per_second(self.calls, self.total_time)
    }

    /// Units per second of total time, or zero if no time has been measured.
    #[must_use]
    pub fn units_per_second(&self) -> f64 {
        per_second(self.units, self.total_time)
    }

    fn metrics(&self) -> SectionMetrics {
        SectionMetrics {
            total_elapsed: self.total_time,
            call_count: self.calls,
            total_units: self.units,
        }
    }

    // Same order as `report_style::COLUMNS`.
    fn cells(&self) -> [String; 6] {
        [
            self.calls.to_string(),
            self.units.to_string(),
            format!("{:?}", self.total_time),
            format!("{:?}", self.mean()),
            format!("{:.2}", self.calls_per_second()),
            format!("{:.2}", self.units_per_second()),
        ]
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "rates are for human consumption, exactness beyond 2^53 events is not required"
)]
fn per_second(count: u64, elapsed: Duration) -> f64 {
    if elapsed.is_zero() {
        0.0
    } else {
        count as f64 / elapsed.as_secs_f64()
    }
}
