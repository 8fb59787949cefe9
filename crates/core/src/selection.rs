use serde::{Deserialize, Serialize};

/// A rectangular block of cells, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl Range {
    /// Create a new range, automatically normalizing so start <= end.
    pub fn new(r1: usize, c1: usize, r2: usize, c2: usize) -> Self {
        Self {
            start_row: r1.min(r2),
            start_col: c1.min(c2),
            end_row: r1.max(r2),
            end_col: c1.max(c2),
        }
    }

    /// Create a single-cell range.
    pub fn single(row: usize, col: usize) -> Self {
        Self {
            start_row: row,
            start_col: col,
            end_row: row,
            end_col: col,
        }
    }

    /// Check if this range contains a cell.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.start_row && row <= self.end_row &&
        col >= self.start_col && col <= self.end_col
    }

    /// Number of cells in this range.
    pub fn cell_count(&self) -> usize {
        (self.end_row - self.start_row + 1) * (self.end_col - self.start_col + 1)
    }

    /// Iterate over all cells in this range (row-major order).
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let start_row = self.start_row;
        let end_row = self.end_row;
        let start_col = self.start_col;
        let end_col = self.end_col;

        (start_row..=end_row).flat_map(move |r| {
            (start_col..=end_col).map(move |c| (r, c))
        })
    }

    /// Check if this is a single cell.
    pub fn is_single(&self) -> bool {
        self.start_row == self.end_row && self.start_col == self.end_col
    }
}

/// The shape of the active selection.
///
/// `Row` and `Column` cover a contiguous span of whole lines and
/// conceptually extend across the entire orthogonal axis; the live counts
/// are supplied by callers whenever a concrete rectangle is needed, so a
/// structural edit that happens after selecting is always reflected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Cell { row: usize, col: usize },
    Row { start: usize, end: usize },
    Column { start: usize, end: usize },
    Range(Range),
}

impl Selection {
    /// Inclusive row span, expanding a `Column` selection to the full axis.
    pub fn row_span(&self, row_count: usize) -> (usize, usize) {
        match *self {
            Selection::Cell { row, .. } => (row, row),
            Selection::Row { start, end } => (start, end),
            Selection::Column { .. } => (0, row_count.saturating_sub(1)),
            Selection::Range(r) => (r.start_row, r.end_row),
        }
    }

    /// Inclusive column span, expanding a `Row` selection to the full axis.
    pub fn col_span(&self, col_count: usize) -> (usize, usize) {
        match *self {
            Selection::Cell { col, .. } => (col, col),
            Selection::Row { .. } => (0, col_count.saturating_sub(1)),
            Selection::Column { start, end } => (start, end),
            Selection::Range(r) => (r.start_col, r.end_col),
        }
    }

    /// The concrete rectangle this selection covers on a grid with the given
    /// counts, clamped to bounds. `None` on an empty grid.
    pub fn rect(&self, row_count: usize, col_count: usize) -> Option<Range> {
        if row_count == 0 || col_count == 0 {
            return None;
        }
        let (r0, r1) = self.row_span(row_count);
        let (c0, c1) = self.col_span(col_count);
        Some(Range {
            start_row: r0.min(row_count - 1),
            start_col: c0.min(col_count - 1),
            end_row: r1.min(row_count - 1),
            end_col: c1.min(col_count - 1),
        })
    }

    /// Enumerate every cell covered on a grid with the given counts.
    pub fn covered_cells(
        &self,
        row_count: usize,
        col_count: usize,
    ) -> impl Iterator<Item = (usize, usize)> {
        self.rect(row_count, col_count)
            .into_iter()
            .flat_map(|r| r.cells())
    }

    /// Check if a cell is selected.
    pub fn contains(&self, row: usize, col: usize, row_count: usize, col_count: usize) -> bool {
        let (r0, r1) = self.row_span(row_count);
        let (c0, c1) = self.col_span(col_count);
        row >= r0 && row <= r1 && col >= c0 && col <= c1
    }

    /// True for a whole-row selection covering `row`.
    pub fn is_row_selected(&self, row: usize) -> bool {
        matches!(*self, Selection::Row { start, end } if row >= start && row <= end)
    }

    /// True for a whole-column selection covering `col`.
    pub fn is_column_selected(&self, col: usize) -> bool {
        matches!(*self, Selection::Column { start, end } if col >= start && col <= end)
    }

    /// Selection after a row is inserted at `at`: every row bound at or past
    /// the insertion point moves down by one. Insert-after edits pass the
    /// index past the anchor line, same convention as the cell store.
    pub fn shifted_for_row_insert(self, at: usize) -> Selection {
        let bump = |i: usize| if i >= at { i + 1 } else { i };
        match self {
            Selection::Cell { row, col } => Selection::Cell { row: bump(row), col },
            Selection::Row { start, end } => Selection::Row { start: bump(start), end: bump(end) },
            Selection::Column { .. } => self,
            Selection::Range(r) => Selection::Range(Range {
                start_row: bump(r.start_row),
                end_row: bump(r.end_row),
                ..r
            }),
        }
    }

    /// Selection after a column is inserted at `at`.
    pub fn shifted_for_col_insert(self, at: usize) -> Selection {
        let bump = |i: usize| if i >= at { i + 1 } else { i };
        match self {
            Selection::Cell { row, col } => Selection::Cell { row, col: bump(col) },
            Selection::Column { start, end } => {
                Selection::Column { start: bump(start), end: bump(end) }
            }
            Selection::Row { .. } => self,
            Selection::Range(r) => Selection::Range(Range {
                start_col: bump(r.start_col),
                end_col: bump(r.end_col),
                ..r
            }),
        }
    }

    /// Selection after the row at `at` is deleted. Later bounds shift back by
    /// one; a selection living entirely on the deleted line disappears.
    pub fn shifted_for_row_delete(self, at: usize) -> Option<Selection> {
        match self {
            Selection::Cell { row, col } => match row {
                r if r == at => None,
                r if r > at => Some(Selection::Cell { row: r - 1, col }),
                _ => Some(self),
            },
            Selection::Row { start, end } => {
                shrink_span(start, end, at).map(|(start, end)| Selection::Row { start, end })
            }
            Selection::Column { .. } => Some(self),
            Selection::Range(r) => {
                shrink_span(r.start_row, r.end_row, at).map(|(start_row, end_row)| {
                    Selection::Range(Range { start_row, end_row, ..r })
                })
            }
        }
    }

    /// Selection after the column at `at` is deleted.
    pub fn shifted_for_col_delete(self, at: usize) -> Option<Selection> {
        match self {
            Selection::Cell { row, col } => match col {
                c if c == at => None,
                c if c > at => Some(Selection::Cell { row, col: c - 1 }),
                _ => Some(self),
            },
            Selection::Column { start, end } => {
                shrink_span(start, end, at).map(|(start, end)| Selection::Column { start, end })
            }
            Selection::Row { .. } => Some(self),
            Selection::Range(r) => {
                shrink_span(r.start_col, r.end_col, at).map(|(start_col, end_col)| {
                    Selection::Range(Range { start_col, end_col, ..r })
                })
            }
        }
    }
}

/// Adjust an inclusive `[start, end]` span for the deletion of index `at`.
/// `None` when the span was exactly the deleted line.
fn shrink_span(start: usize, end: usize, at: usize) -> Option<(usize, usize)> {
    if start == end && start == at {
        return None;
    }
    let start = if start > at { start - 1 } else { start };
    let end = if end >= at { end.saturating_sub(1) } else { end };
    Some((start, end.max(start)))
}

/// Owner of the single active selection. Handlers request replacement or
/// extension through these methods and never hold a copy of their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveSelection {
    selection: Option<Selection>,
}

impl ActiveSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current selection, if any.
    pub fn current(&self) -> Option<Selection> {
        self.selection
    }

    pub fn clear(&mut self) {
        self.selection = None;
    }

    /// Replace the selection with a single cell (click).
    pub fn select_cell(&mut self, row: usize, col: usize) {
        self.selection = Some(Selection::Cell { row, col });
    }

    /// Replace the selection with a single whole row (header click).
    pub fn select_row(&mut self, row: usize) {
        self.selection = Some(Selection::Row { start: row, end: row });
    }

    /// Replace the selection with a single whole column (header click).
    pub fn select_column(&mut self, col: usize) {
        self.selection = Some(Selection::Column { start: col, end: col });
    }

    /// Replace the selection with a rectangle between anchor and focus,
    /// normalized so drag direction does not matter.
    pub fn select_range(&mut self, anchor: (usize, usize), focus: (usize, usize)) {
        self.selection = Some(Selection::Range(Range::new(anchor.0, anchor.1, focus.0, focus.1)));
    }

    /// Recompute a row-span selection from a fixed anchor during a header
    /// drag. The anchor end never moves; only the focus end follows.
    pub fn extend_rows_to(&mut self, anchor: usize, row: usize) {
        self.selection = Some(Selection::Row {
            start: anchor.min(row),
            end: anchor.max(row),
        });
    }

    /// Column twin of [`extend_rows_to`](Self::extend_rows_to).
    pub fn extend_columns_to(&mut self, anchor: usize, col: usize) {
        self.selection = Some(Selection::Column {
            start: anchor.min(col),
            end: anchor.max(col),
        });
    }

    /// Recompute the range rectangle from a fixed anchor cell and a new
    /// focus cell during a cell drag.
    pub fn extend_range_to(&mut self, anchor: (usize, usize), focus: (usize, usize)) {
        self.select_range(anchor, focus);
    }

    pub fn contains(&self, row: usize, col: usize, row_count: usize, col_count: usize) -> bool {
        self.selection
            .map(|s| s.contains(row, col, row_count, col_count))
            .unwrap_or(false)
    }

    pub fn is_row_selected(&self, row: usize) -> bool {
        self.selection.map(|s| s.is_row_selected(row)).unwrap_or(false)
    }

    pub fn is_column_selected(&self, col: usize) -> bool {
        self.selection.map(|s| s.is_column_selected(col)).unwrap_or(false)
    }

    /// Re-index the selection for a row inserted at `at`.
    pub fn shift_for_row_insert(&mut self, at: usize) {
        self.selection = self.selection.map(|s| s.shifted_for_row_insert(at));
    }

    /// Re-index the selection for a column inserted at `at`.
    pub fn shift_for_col_insert(&mut self, at: usize) {
        self.selection = self.selection.map(|s| s.shifted_for_col_insert(at));
    }

    /// Re-index the selection for the deletion of row `at`.
    pub fn shift_for_row_delete(&mut self, at: usize) {
        self.selection = self.selection.and_then(|s| s.shifted_for_row_delete(at));
    }

    /// Re-index the selection for the deletion of column `at`.
    pub fn shift_for_col_delete(&mut self, at: usize) {
        self.selection = self.selection.and_then(|s| s.shifted_for_col_delete(at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_normalizes() {
        let r = Range::new(5, 5, 1, 1);
        assert_eq!(r.start_row, 1);
        assert_eq!(r.start_col, 1);
        assert_eq!(r.end_row, 5);
        assert_eq!(r.end_col, 5);
    }

    #[test]
    fn test_range_cells_row_major() {
        let r = Range::new(1, 1, 2, 2);
        let cells: Vec<_> = r.cells().collect();
        assert_eq!(cells, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
        assert_eq!(r.cell_count(), 4);
    }

    #[test]
    fn test_select_range_drag_direction_does_not_matter() {
        let mut a = ActiveSelection::new();
        let mut b = ActiveSelection::new();
        a.select_range((4, 5), (1, 2));
        b.select_range((1, 2), (4, 5));
        assert_eq!(a.current(), b.current());
        assert!(a.contains(2, 3, 10, 10));
        assert!(!a.contains(0, 0, 10, 10));
    }

    #[test]
    fn test_row_selection_spans_all_columns() {
        let mut sel = ActiveSelection::new();
        sel.select_row(2);
        assert!(sel.is_row_selected(2));
        assert!(sel.contains(2, 7, 10, 8));
        assert!(!sel.contains(3, 7, 10, 8));

        let covered: Vec<_> = sel.current().unwrap().covered_cells(10, 3).collect();
        assert_eq!(covered, vec![(2, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_extend_rows_from_anchor() {
        let mut sel = ActiveSelection::new();
        sel.select_row(5);
        sel.extend_rows_to(5, 2);
        assert_eq!(sel.current(), Some(Selection::Row { start: 2, end: 5 }));
        sel.extend_rows_to(5, 8);
        assert_eq!(sel.current(), Some(Selection::Row { start: 5, end: 8 }));
    }

    #[test]
    fn test_row_selection_shifts_on_insert_above() {
        let mut sel = ActiveSelection::new();
        sel.select_row(5);
        sel.shift_for_row_insert(3);
        assert_eq!(sel.current(), Some(Selection::Row { start: 6, end: 6 }));
    }

    #[test]
    fn test_insert_below_selection_does_not_shift() {
        let mut sel = ActiveSelection::new();
        sel.select_row(5);
        sel.shift_for_row_insert(6);
        assert_eq!(sel.current(), Some(Selection::Row { start: 5, end: 5 }));
    }

    #[test]
    fn test_delete_selected_row_clears() {
        let mut sel = ActiveSelection::new();
        sel.select_row(4);
        sel.shift_for_row_delete(4);
        assert_eq!(sel.current(), None);
    }

    #[test]
    fn test_delete_inside_span_shrinks() {
        let mut sel = ActiveSelection::new();
        sel.extend_rows_to(2, 5);
        sel.shift_for_row_delete(3);
        assert_eq!(sel.current(), Some(Selection::Row { start: 2, end: 4 }));
    }

    #[test]
    fn test_delete_before_cell_shifts_back() {
        let mut sel = ActiveSelection::new();
        sel.select_cell(4, 2);
        sel.shift_for_row_delete(1);
        assert_eq!(sel.current(), Some(Selection::Cell { row: 3, col: 2 }));
        sel.shift_for_col_delete(2);
        assert_eq!(sel.current(), None);
    }

    #[test]
    fn test_column_selection_untouched_by_row_edits() {
        let mut sel = ActiveSelection::new();
        sel.select_column(3);
        sel.shift_for_row_insert(0);
        sel.shift_for_row_delete(0);
        assert_eq!(sel.current(), Some(Selection::Column { start: 3, end: 3 }));
    }
}
