use serde::Serialize;

use gridcanvas_core::{ActiveSelection, Selection};

use crate::axis::{self, Axis};
use crate::cells::CellStore;
use crate::error::GridError;
use crate::viewport::PixelRect;

/// Largest supported grid dimensions.
pub const MAX_ROWS: usize = 100_000;
pub const MAX_COLS: usize = 5_000;

pub const DEFAULT_ROW_HEIGHT: f64 = 24.0;
pub const DEFAULT_COL_WIDTH: f64 = 80.0;

/// Everything removed by a line deletion: the line's size override and its
/// stored cells, keyed by the orthogonal index. Enough to restore the line
/// exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedLine {
    pub size_override: Option<f64>,
    pub cells: Vec<(usize, String)>,
}

/// The grid aggregate: both geometry axes, the sparse cell store, and the
/// active selection. Structural edits go through this type so all three
/// stay re-indexed together.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: Axis,
    cols: Axis,
    cells: CellStore,
    selection: ActiveSelection,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_defaults(rows, cols, DEFAULT_ROW_HEIGHT, DEFAULT_COL_WIDTH)
    }

    /// A grid with custom default line sizes, for settings-driven setup.
    pub fn with_defaults(rows: usize, cols: usize, row_height: f64, col_width: f64) -> Self {
        let rows = rows.min(MAX_ROWS);
        let cols = cols.min(MAX_COLS);
        Self {
            rows: Axis::rows(rows, row_height),
            cols: Axis::columns(cols, col_width),
            cells: CellStore::new(rows, cols),
            selection: ActiveSelection::new(),
        }
    }

    /// A grid at the maximum supported dimensions.
    pub fn full() -> Self {
        Self::new(MAX_ROWS, MAX_COLS)
    }

    pub fn row_count(&self) -> usize {
        self.rows.count()
    }

    pub fn col_count(&self) -> usize {
        self.cols.count()
    }

    pub fn rows(&self) -> &Axis {
        &self.rows
    }

    pub fn cols(&self) -> &Axis {
        &self.cols
    }

    pub fn row_size(&self, index: usize) -> Result<f64, GridError> {
        self.rows.size(index)
    }

    pub fn col_size(&self, index: usize) -> Result<f64, GridError> {
        self.cols.size(index)
    }

    pub fn set_row_size(&mut self, index: usize, size: f64) -> Result<(), GridError> {
        self.rows.set_size(index, size)
    }

    pub fn set_col_size(&mut self, index: usize, size: f64) -> Result<(), GridError> {
        self.cols.set_size(index, size)
    }

    pub fn total_height(&self) -> f64 {
        self.rows.total_size()
    }

    pub fn total_width(&self) -> f64 {
        self.cols.total_size()
    }

    pub fn cell_text(&self, row: usize, col: usize) -> Result<&str, GridError> {
        self.cells.get(row, col)
    }

    pub fn set_cell_text(
        &mut self,
        row: usize,
        col: usize,
        value: impl Into<String>,
    ) -> Result<(), GridError> {
        self.cells.set(row, col, value)
    }

    /// Number of stored (non-empty) cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.occupied()
    }

    pub fn column_label(&self, col: usize) -> String {
        axis::column_label(col)
    }

    pub fn selection(&self) -> &ActiveSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut ActiveSelection {
        &mut self.selection
    }

    pub fn is_row_selected(&self, row: usize) -> bool {
        self.selection.is_row_selected(row)
    }

    pub fn is_column_selected(&self, col: usize) -> bool {
        self.selection.is_column_selected(col)
    }

    pub fn is_cell_selected(&self, row: usize, col: usize) -> bool {
        self.selection.contains(row, col, self.row_count(), self.col_count())
    }

    /// The selection's rectangle in absolute content pixels, for drawing
    /// the highlight border.
    pub fn selection_bounds(&self) -> Option<PixelRect> {
        let rect = self
            .selection
            .current()?
            .rect(self.row_count(), self.col_count())?;
        let x = self.cols.offset(rect.start_col);
        let y = self.rows.offset(rect.start_row);
        Some(PixelRect {
            x,
            y,
            width: self.cols.offset(rect.end_col + 1) - x,
            height: self.rows.offset(rect.end_row + 1) - y,
        })
    }

    /// Status-bar statistics for the active selection. Walks stored cells
    /// only, so a whole-column selection on a sparse grid stays cheap.
    pub fn selection_stats(&self) -> Option<SelectionStats> {
        let selection = self.selection.current()?;
        let (r0, r1) = selection.row_span(self.row_count());
        let (c0, c1) = selection.col_span(self.col_count());

        let mut stats = SelectionStats::default();
        for ((r, c), value) in self.cells.iter() {
            if r < r0 || r > r1 || c < c0 || c > c1 {
                continue;
            }
            stats.count += 1;
            if let Ok(n) = value.trim().parse::<f64>() {
                stats.numeric_count += 1;
                stats.sum += n;
                stats.min = Some(stats.min.map_or(n, |m: f64| m.min(n)));
                stats.max = Some(stats.max.map_or(n, |m: f64| m.max(n)));
            }
        }
        Some(stats)
    }

    /// Insert an empty default-sized row so it becomes index `at`.
    pub fn insert_row(&mut self, at: usize) -> Result<(), GridError> {
        self.rows.insert(at)?;
        self.cells.insert_row(at)?;
        self.selection.shift_for_row_insert(at);
        Ok(())
    }

    /// Insert an empty default-sized column so it becomes index `at`.
    pub fn insert_col(&mut self, at: usize) -> Result<(), GridError> {
        self.cols.insert(at)?;
        self.cells.insert_col(at)?;
        self.selection.shift_for_col_insert(at);
        Ok(())
    }

    /// Delete row `at`, returning everything needed to restore it.
    pub fn delete_row(&mut self, at: usize) -> Result<RemovedLine, GridError> {
        let size_override = self.rows.delete(at)?;
        let cells = self.cells.delete_row(at)?;
        self.selection.shift_for_row_delete(at);
        Ok(RemovedLine { size_override, cells })
    }

    /// Delete column `at`, returning everything needed to restore it.
    pub fn delete_col(&mut self, at: usize) -> Result<RemovedLine, GridError> {
        let size_override = self.cols.delete(at)?;
        let cells = self.cells.delete_col(at)?;
        self.selection.shift_for_col_delete(at);
        Ok(RemovedLine { size_override, cells })
    }

    /// Snapshot row `at` without mutating, for building an undoable delete.
    pub(crate) fn snapshot_row(&self, at: usize) -> Result<RemovedLine, GridError> {
        let size = self.rows.size(at)?;
        let size_override = (size != self.rows.default_size()).then_some(size);
        let cells = self
            .cells
            .iter()
            .filter(|&((r, _), _)| r == at)
            .map(|((_, c), v)| (c, v.to_string()))
            .collect();
        Ok(RemovedLine { size_override, cells })
    }

    /// Snapshot column `at` without mutating.
    pub(crate) fn snapshot_col(&self, at: usize) -> Result<RemovedLine, GridError> {
        let size = self.cols.size(at)?;
        let size_override = (size != self.cols.default_size()).then_some(size);
        let cells = self
            .cells
            .iter()
            .filter(|&((_, c), _)| c == at)
            .map(|((r, _), v)| (r, v.to_string()))
            .collect();
        Ok(RemovedLine { size_override, cells })
    }

    /// Put back a deleted row: re-open the slot, then restore its override
    /// and cells.
    pub(crate) fn restore_row(&mut self, at: usize, line: &RemovedLine) -> Result<(), GridError> {
        self.rows.insert(at)?;
        self.cells.insert_row(at)?;
        self.rows.restore_override(at, line.size_override);
        for (col, value) in &line.cells {
            self.cells.set(at, *col, value.clone())?;
        }
        self.selection.shift_for_row_insert(at);
        Ok(())
    }

    /// Put back a deleted column.
    pub(crate) fn restore_col(&mut self, at: usize, line: &RemovedLine) -> Result<(), GridError> {
        self.cols.insert(at)?;
        self.cells.insert_col(at)?;
        self.cols.restore_override(at, line.size_override);
        for (row, value) in &line.cells {
            self.cells.set(*row, at, value.clone())?;
        }
        self.selection.shift_for_col_insert(at);
        Ok(())
    }

    /// The currently selected whole-row span, if the selection is a row
    /// selection.
    pub fn selected_rows(&self) -> Option<(usize, usize)> {
        match self.selection.current()? {
            Selection::Row { start, end } => Some((start, end)),
            _ => None,
        }
    }

    /// The currently selected whole-column span, if the selection is a
    /// column selection.
    pub fn selected_cols(&self) -> Option<(usize, usize)> {
        match self.selection.current()? {
            Selection::Column { start, end } => Some((start, end)),
            _ => None,
        }
    }
}

/// Aggregates for the status bar. `min`/`max` are `None` when no covered
/// cell parses as a number.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SelectionStats {
    pub count: usize,
    pub numeric_count: usize,
    pub sum: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SelectionStats {
    pub fn average(&self) -> Option<f64> {
        (self.numeric_count > 0).then(|| self.sum / self.numeric_count as f64)
    }
}
