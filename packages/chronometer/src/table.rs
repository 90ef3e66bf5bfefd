//! Rectangular export of recorded durations.

use std::fmt::{self, Display};
use std::iter;
use std::time::Duration;

use crate::summary::format_seconds;

/// Recorded durations arranged as equally long named columns.
///
/// Each key of the exporting [`Chronometer`](crate::Chronometer) becomes one column. Keys with
/// fewer recorded durations than the longest key are padded with `None` at the end, so every
/// column has [`row_count()`](Self::row_count) cells and the real values always form a prefix.
///
/// The `Display` implementation renders the table as aligned plain text, leaving missing cells
/// blank, which is convenient for a quick look in a terminal. For anything else, read the
/// columns and hand them to the data processing library of your choice.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use chronometer::Chronometer;
///
/// let chronometer = Chronometer::builder().log(false).build();
/// chronometer.record("a", Duration::from_millis(100));
/// chronometer.record("a", Duration::from_millis(200));
/// chronometer.record("b", Duration::from_millis(300));
///
/// let table = chronometer.export();
/// assert_eq!(table.row_count(), 2);
///
/// let b = table.column("b").unwrap();
/// assert_eq!(b.values(), &[Some(Duration::from_millis(300)), None]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
    precision: usize,
}

/// One named column of a [`Table`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    name: String,
    values: Vec<Option<Duration>>,
}

impl Table {
    /// Builds a table from ragged named sequences, padding every sequence to the longest one.
    ///
    /// If there are no sequences, the table has no columns and no rows.
    pub(crate) fn from_ragged<'a>(
        series: impl IntoIterator<Item = (&'a str, &'a [Duration])>,
        precision: usize,
    ) -> Self {
        let series = series.into_iter().collect::<Vec<_>>();

        let row_count = series
            .iter()
            .map(|(_, durations)| durations.len())
            .max()
            .unwrap_or(0);

        let columns = series
            .into_iter()
            .map(|(name, durations)| Column {
                name: name.to_string(),
                values: durations
                    .iter()
                    .copied()
                    .map(Some)
                    .chain(iter::repeat(None))
                    .take(row_count)
                    .collect(),
            })
            .collect();

        Self {
            columns,
            row_count,
            precision,
        }
    }

    /// The columns of the table, in key order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The column with the given name, if any.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// The number of rows, which is the length of every column.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Whether the table has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterates over the rows of the table, each row holding one cell per column.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Option<Duration>>> + '_ {
        (0..self.row_count).map(|row| {
            self.columns
                .iter()
                .map(|column| column.values.get(row).copied().flatten())
                .collect()
        })
    }
}

impl Column {
    /// The key this column was exported from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cells of the column. `None` marks padding after the recorded values.
    #[must_use]
    pub fn values(&self) -> &[Option<Duration>] {
        &self.values
    }

    /// The number of real (non-padding) values in the column.
    #[must_use]
    pub fn count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self
            .columns
            .iter()
            .map(|column| {
                column
                    .values
                    .iter()
                    .map(|value| {
                        value.map_or_else(String::new, |d| format_seconds(d, self.precision))
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let widths = self
            .columns
            .iter()
            .zip(&cells)
            .map(|(column, cells)| {
                cells
                    .iter()
                    .map(String::len)
                    .chain([column.name.len()])
                    .max()
                    .unwrap_or(0)
            })
            .collect::<Vec<_>>();

        let index_width = self.row_count.saturating_sub(1).to_string().len();

        write!(f, "{:index_width$}", "")?;
        for (column, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", column.name)?;
        }
        writeln!(f)?;

        for row in 0..self.row_count {
            write!(f, "{row:<index_width$}")?;
            for (cells, width) in cells.iter().zip(&widths) {
                let cell = cells.get(row).map_or("", String::as_str);
                write!(f, "  {cell:>width$}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
