//! The layout facade: rows, per-row widths and keynote detection for the
//! rendering layer.
//!
//! ## Usage
//!
//! ```
//! use agenda_kernel::{AgendaLayout, LayoutConfig, Session};
//!
//! let sessions: Vec<Session> = (0..5)
//!     .map(|id| Session::new(id, "10:30 AM", "11:30 AM", "talk"))
//!     .collect();
//!
//! let layout = AgendaLayout::compute(&sessions, &LayoutConfig::default());
//! assert_eq!(layout.len(), 2);
//! assert_eq!(layout.width_for_row(1), "50%");
//! ```

use tracing::debug;

use crate::balance::{SplitTable, balance};
use crate::config::LayoutConfig;
use crate::grouping::cluster_indices;
use crate::item::AgendaItem;

/// Width applied to keynotes and to rows the caller asks about but that do
/// not exist.
pub const FULL_WIDTH: &str = "100%";

/// Sessions displayed side by side.
#[derive(Debug, Clone)]
pub struct Row<'a, T> {
    /// Parsed start time shared by every session in the row.
    pub start_minutes: f64,
    pub items: Vec<&'a T>,
}

impl<'a, T> Row<'a, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.items.iter().copied()
    }

    /// Column width for each card in this row, e.g. `"25%"`.
    pub fn width(&self) -> String {
        percentage_width(self.items.len())
    }
}

/// Rows computed for one input slice.
#[derive(Debug, Clone)]
pub struct AgendaLayout<'a, T> {
    rows: Vec<Row<'a, T>>,
    keynote_session_type: String,
}

impl<'a, T: AgendaItem> AgendaLayout<'a, T> {
    /// Group `items` by start time and balance every group into rows.
    ///
    /// Never fails. Rows come out in ascending start time; an empty start
    /// time counts as midnight and sorts first, while unparsable times sort
    /// after every valid one, each in its own row. Splits the config would
    /// reject are ignored and those cluster sizes are chunked instead.
    pub fn compute(items: &'a [T], config: &LayoutConfig) -> Self {
        let table = SplitTable::lenient(config);
        let rows = compute_row_indices(items, &table);
        Self::from_row_indices(items, &rows, &config.keynote_session_type)
    }

    /// Rebuild a layout from row position lists computed earlier for the
    /// same slice.
    pub(crate) fn from_row_indices(
        items: &'a [T],
        rows: &[(f64, Vec<usize>)],
        keynote_session_type: &str,
    ) -> Self {
        let rows = rows
            .iter()
            .map(|(start_minutes, positions)| Row {
                start_minutes: *start_minutes,
                items: positions.iter().map(|&i| &items[i]).collect(),
            })
            .collect();

        Self {
            rows,
            keynote_session_type: keynote_session_type.to_string(),
        }
    }

    /// True iff the item's session type equals the configured keynote type
    /// exactly.
    pub fn is_keynote(&self, item: &T) -> bool {
        item.session_type() == self.keynote_session_type
    }

    /// Width for one card: full width for keynotes, the row width otherwise.
    pub fn width_for_card(&self, row_index: usize, item: &T) -> String {
        if self.is_keynote(item) {
            FULL_WIDTH.to_string()
        } else {
            self.width_for_row(row_index)
        }
    }
}

impl<'a, T> AgendaLayout<'a, T> {
    pub fn rows(&self) -> &[Row<'a, T>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row<'a, T>> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row<'a, T>> {
        self.rows
    }

    /// `100 / row length` as a percentage string.
    ///
    /// Out-of-range indices and empty rows get [`FULL_WIDTH`].
    pub fn width_for_row(&self, row_index: usize) -> String {
        match self.rows.get(row_index) {
            Some(row) => row.width(),
            None => FULL_WIDTH.to_string(),
        }
    }
}

/// Compute rows as `(start_minutes, positions)` pairs into `items`.
pub(crate) fn compute_row_indices<T: AgendaItem>(
    items: &[T],
    table: &SplitTable,
) -> Vec<(f64, Vec<usize>)> {
    let clusters = cluster_indices(items);
    let cluster_count = clusters.len();

    let rows: Vec<(f64, Vec<usize>)> = clusters
        .into_iter()
        .flat_map(|(start_minutes, members)| {
            balance(members, table)
                .into_iter()
                .map(move |row| (start_minutes, row))
        })
        .collect();

    debug!(
        sessions = items.len(),
        clusters = cluster_count,
        rows = rows.len(),
        "computed agenda layout"
    );

    rows
}

fn percentage_width(len: usize) -> String {
    if len == 0 {
        return FULL_WIDTH.to_string();
    }
    format!("{}%", 100.0 / len as f64)
}
