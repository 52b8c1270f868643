use std::borrow::Cow;

const ELLIPSIS: &str = "...";

/// Layout options for the textual form of a [`Report`](crate::Report).
///
/// The default layout has a 50 character name column and includes the unit columns.
///
/// # Examples
///
/// ```
/// use probes::{ReportStyle, Store};
///
/// let store = Store::new();
/// store.start("a_rather_long_section_name").stop();
///
/// let style = ReportStyle::new().with_name_width(12).with_unit_columns(false);
/// let text = store.to_report().with_style(style).to_string();
///
/// assert!(text.contains("...tion_name"));
/// assert!(!text.contains("Units/sec"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportStyle {
    name_width: usize,
    unit_columns: bool,
}

/// One right-aligned column after the name column.
#[derive(Debug)]
pub(crate) struct Column {
    pub(crate) title: &'static str,
    pub(crate) width: usize,
    pub(crate) units_only: bool,
}

pub(crate) static COLUMNS: [Column; 6] = [
    Column {
        title: "Calls",
        width: 10,
        units_only: false,
    },
    Column {
        title: "Units",
        width: 10,
        units_only: true,
    },
    Column {
        title: "Total Time",
        width: 15,
        units_only: false,
    },
    Column {
        title: "Avg Time",
        width: 15,
        units_only: false,
    },
    Column {
        title: "Calls/sec",
        width: 10,
        units_only: false,
    },
    Column {
        title: "Units/sec",
        width: 10,
        units_only: true,
    },
];

impl ReportStyle {
    /// Width of the name column unless configured otherwise.
    pub const DEFAULT_NAME_WIDTH: usize = 50;

    /// Smallest accepted name column width: the ellipsis plus one character of the name.
    pub const MIN_NAME_WIDTH: usize = 4;

    /// The default layout.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name_width: Self::DEFAULT_NAME_WIDTH,
            unit_columns: true,
        }
    }

    /// Sets the width of the name column.
    ///
    /// Longer names are shortened to their tail, prefixed with `...`. Widths below
    /// [`MIN_NAME_WIDTH`](Self::MIN_NAME_WIDTH) are raised to it.
    #[must_use]
    pub const fn with_name_width(self, name_width: usize) -> Self {
        let name_width = if name_width < Self::MIN_NAME_WIDTH {
            Self::MIN_NAME_WIDTH
        } else {
            name_width
        };

        Self { name_width, ..self }
    }

    /// Sets whether the "Units" and "Units/sec" columns are included.
    #[must_use]
    pub const fn with_unit_columns(self, unit_columns: bool) -> Self {
        Self {
            unit_columns,
            ..self
        }
    }

    /// The width of the name column.
    #[must_use]
    pub const fn name_width(&self) -> usize {
        self.name_width
    }

    /// Whether the unit columns are included.
    #[must_use]
    pub const fn unit_columns(&self) -> bool {
        self.unit_columns
    }

    /// The columns after the name column, in display order.
    pub(crate) fn columns(&self) -> impl Iterator<Item = (usize, &'static Column)> {
        let unit_columns = self.unit_columns;

        COLUMNS
            .iter()
            .enumerate()
            .filter(move |(_, column)| unit_columns || !column.units_only)
    }

    /// Total width of a table row, which is also the width of the horizontal rules.
    pub(crate) fn table_width(&self) -> usize {
        // Each column is preceded by a single space separator.
        self.columns()
            .fold(self.name_width, |width, (_, column)| {
                width.saturating_add(column.width).saturating_add(1)
            })
    }

    /// Fits a section name into the name column, keeping its tail.
    pub(crate) fn fit_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        let char_count = name.chars().count();

        if char_count <= self.name_width {
            return Cow::Borrowed(name);
        }

        let keep = self.name_width.saturating_sub(ELLIPSIS.len());
        let tail: String = name.chars().skip(char_count.saturating_sub(keep)).collect();

        Cow::Owned(format!("{ELLIPSIS}{tail}"))
    }
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self::new()
    }
}
