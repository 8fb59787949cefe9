use serde::Serialize;

use crate::grid::Grid;

/// Fixed header band sizes, matching the drawn chrome.
pub const ROW_HEADER_WIDTH: f64 = 60.0;
pub const COL_HEADER_HEIGHT: f64 = 30.0;

/// An axis-aligned rectangle in absolute content pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One row or column intersecting the viewport: its index, its leading
/// edge in absolute content pixels, and its size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleLine {
    pub index: usize,
    pub origin: f64,
    pub size: f64,
}

/// Scroll state plus window size. Maps between window coordinates (with
/// the header bands) and content coordinates, and enumerates the lines a
/// renderer has to draw. Scrolling is always clamped so no blank space
/// appears past the last line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scroll_x: f64,
    scroll_y: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    pub fn scroll_x(&self) -> f64 {
        self.scroll_x
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn resize(&mut self, grid: &Grid, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.set_scroll(grid, self.scroll_x, self.scroll_y);
    }

    /// Width of the cell area, excluding the row-header band.
    pub fn content_width(&self) -> f64 {
        (self.width - ROW_HEADER_WIDTH).max(0.0)
    }

    /// Height of the cell area, excluding the column-header band.
    pub fn content_height(&self) -> f64 {
        (self.height - COL_HEADER_HEIGHT).max(0.0)
    }

    /// Set the scroll position, clamped to `[0, total - viewport]` on each
    /// axis.
    pub fn set_scroll(&mut self, grid: &Grid, x: f64, y: f64) {
        let max_x = (grid.total_width() - self.content_width()).max(0.0);
        let max_y = (grid.total_height() - self.content_height()).max(0.0);
        self.scroll_x = x.clamp(0.0, max_x);
        self.scroll_y = y.clamp(0.0, max_y);
    }

    pub fn scroll_by(&mut self, grid: &Grid, dx: f64, dy: f64) {
        self.set_scroll(grid, self.scroll_x + dx, self.scroll_y + dy);
    }

    /// Content x for a window x inside the cell area.
    pub fn content_x(&self, window_x: f64) -> f64 {
        window_x - ROW_HEADER_WIDTH + self.scroll_x
    }

    /// Content y for a window y inside the cell area.
    pub fn content_y(&self, window_y: f64) -> f64 {
        window_y - COL_HEADER_HEIGHT + self.scroll_y
    }

    /// The cell under a window position, or `None` over the header bands.
    pub fn cell_at(&self, grid: &Grid, window_x: f64, window_y: f64) -> Option<(usize, usize)> {
        if window_x < ROW_HEADER_WIDTH || window_y < COL_HEADER_HEIGHT {
            return None;
        }
        if grid.row_count() == 0 || grid.col_count() == 0 {
            return None;
        }
        let row = grid.rows().index_at_offset(self.content_y(window_y));
        let col = grid.cols().index_at_offset(self.content_x(window_x));
        Some((row, col))
    }

    /// Rows intersecting the viewport, in order.
    pub fn visible_rows<'a>(&self, grid: &'a Grid) -> impl Iterator<Item = VisibleLine> + 'a {
        visible_lines(
            grid.rows(),
            self.scroll_y,
            self.scroll_y + self.content_height(),
        )
    }

    /// Columns intersecting the viewport, in order.
    pub fn visible_cols<'a>(&self, grid: &'a Grid) -> impl Iterator<Item = VisibleLine> + 'a {
        visible_lines(
            grid.cols(),
            self.scroll_x,
            self.scroll_x + self.content_width(),
        )
    }
}

fn visible_lines(axis: &crate::axis::Axis, from: f64, to: f64) -> impl Iterator<Item = VisibleLine> + '_ {
    let count = axis.count();
    let mut index = if count == 0 { 0 } else { axis.index_at_offset(from) };
    let mut origin = axis.offset(index.min(count));
    std::iter::from_fn(move || {
        if index >= count || origin >= to {
            return None;
        }
        let size = axis.size(index).ok()?;
        let line = VisibleLine { index, origin, size };
        origin += size;
        index += 1;
        Some(line)
    })
}
