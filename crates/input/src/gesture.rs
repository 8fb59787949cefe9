use gridcanvas_engine::viewport::{COL_HEADER_HEIGHT, ROW_HEADER_WIDTH};

use crate::session::GridState;

/// How close to a header boundary the pointer has to be to grab a resize
/// handle.
pub const RESIZE_TOLERANCE: f64 = 5.0;

/// Default resize floors, overridable via `resize.minColumnWidth` and
/// `resize.minRowHeight` in the settings file.
pub const MIN_COL_WIDTH: f64 = 20.0;
pub const MIN_ROW_HEIGHT: f64 = 15.0;

/// The in-flight pointer gesture. Exactly one can be active; pointer-up
/// (or cancellation) always returns to `Idle`. Resize gestures remember
/// the starting size so the final command can carry it for undo.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    ColumnResize { index: usize, initial_size: f64 },
    RowResize { index: usize, initial_size: f64 },
    ColumnSelect { anchor: usize, current: usize },
    RowSelect { anchor: usize, current: usize },
    RangeSelect { anchor: (usize, usize) },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}

/// What the pointer is hovering over, for cursor feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Cell,
    ColResize,
    RowResize,
}

/// Column whose right edge sits under `(x, y)` in the column header band,
/// within tolerance.
pub fn col_resize_hit(state: &GridState, x: f64, y: f64) -> Option<usize> {
    if !(y >= 0.0 && y <= COL_HEADER_HEIGHT && x > ROW_HEADER_WIDTH) {
        return None;
    }
    let cols = state.grid.cols();
    if cols.count() == 0 {
        return None;
    }
    let content_x = state.viewport.content_x(x);
    let col = cols.index_at_offset(content_x);
    edge_hit(content_x, cols.offset(col + 1), state.viewport.scroll_x())
        .then_some(col)
        .or_else(|| {
            (col > 0 && edge_hit(content_x, cols.offset(col), state.viewport.scroll_x()))
                .then(|| col - 1)
        })
}

/// Row whose bottom edge sits under `(x, y)` in the row header band.
pub fn row_resize_hit(state: &GridState, x: f64, y: f64) -> Option<usize> {
    if !(x >= 0.0 && x <= ROW_HEADER_WIDTH && y > COL_HEADER_HEIGHT) {
        return None;
    }
    let rows = state.grid.rows();
    if rows.count() == 0 {
        return None;
    }
    let content_y = state.viewport.content_y(y);
    let row = rows.index_at_offset(content_y);
    edge_hit(content_y, rows.offset(row + 1), state.viewport.scroll_y())
        .then_some(row)
        .or_else(|| {
            (row > 0 && edge_hit(content_y, rows.offset(row), state.viewport.scroll_y()))
                .then(|| row - 1)
        })
}

/// Edge must be near the pointer and actually visible past the header
/// band, so the first line's hidden leading edge never grabs.
fn edge_hit(content_pos: f64, edge: f64, scroll: f64) -> bool {
    (content_pos - edge).abs() < RESIZE_TOLERANCE && edge > scroll
}

/// True over the column header band (excluding the corner).
pub fn in_col_header(x: f64, y: f64) -> bool {
    y >= 0.0 && y < COL_HEADER_HEIGHT && x > ROW_HEADER_WIDTH
}

/// True over the row header band (excluding the corner).
pub fn in_row_header(x: f64, y: f64) -> bool {
    x >= 0.0 && x < ROW_HEADER_WIDTH && y > COL_HEADER_HEIGHT
}
