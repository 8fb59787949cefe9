use rustc_hash::FxHashMap;

use crate::error::{AxisKind, GridError};

/// Sparse cell store keyed by `(row, col)`. Only non-empty values are
/// stored; writing an empty string removes the entry, so memory tracks
/// occupied cells rather than grid area.
#[derive(Debug, Clone)]
pub struct CellStore {
    rows: usize,
    cols: usize,
    cells: FxHashMap<(usize, usize), String>,
}

impl CellStore {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: FxHashMap::default(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored (non-empty) cells.
    pub fn occupied(&self) -> usize {
        self.cells.len()
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.rows {
            return Err(GridError::IndexOutOfBounds {
                axis: AxisKind::Row,
                index: row,
                count: self.rows,
            });
        }
        if col >= self.cols {
            return Err(GridError::IndexOutOfBounds {
                axis: AxisKind::Column,
                index: col,
                count: self.cols,
            });
        }
        Ok(())
    }

    /// Cell text, `""` for an in-bounds cell with no stored value.
    pub fn get(&self, row: usize, col: usize) -> Result<&str, GridError> {
        self.check_bounds(row, col)?;
        Ok(self.cells.get(&(row, col)).map(String::as_str).unwrap_or(""))
    }

    /// Store `value` at `(row, col)`. An empty value deletes the entry.
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>) -> Result<(), GridError> {
        self.check_bounds(row, col)?;
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
        Ok(())
    }

    /// Iterate over every stored cell.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &str)> {
        self.cells.iter().map(|(&k, v)| (k, v.as_str()))
    }

    /// Make room for a new empty row at `at`; stored cells at or past it
    /// shift down. Touches occupied entries only.
    pub fn insert_row(&mut self, at: usize) -> Result<(), GridError> {
        if at > self.rows {
            return Err(GridError::IndexOutOfBounds {
                axis: AxisKind::Row,
                index: at,
                count: self.rows,
            });
        }
        let old = std::mem::take(&mut self.cells);
        self.cells = old
            .into_iter()
            .map(|((r, c), v)| (if r >= at { (r + 1, c) } else { (r, c) }, v))
            .collect();
        self.rows += 1;
        Ok(())
    }

    /// Make room for a new empty column at `at`.
    pub fn insert_col(&mut self, at: usize) -> Result<(), GridError> {
        if at > self.cols {
            return Err(GridError::IndexOutOfBounds {
                axis: AxisKind::Column,
                index: at,
                count: self.cols,
            });
        }
        let old = std::mem::take(&mut self.cells);
        self.cells = old
            .into_iter()
            .map(|((r, c), v)| (if c >= at { (r, c + 1) } else { (r, c) }, v))
            .collect();
        self.cols += 1;
        Ok(())
    }

    /// Delete row `at`, returning its stored cells as `(col, value)` pairs
    /// so an undo can put them back.
    pub fn delete_row(&mut self, at: usize) -> Result<Vec<(usize, String)>, GridError> {
        if at >= self.rows {
            return Err(GridError::IndexOutOfBounds {
                axis: AxisKind::Row,
                index: at,
                count: self.rows,
            });
        }
        let old = std::mem::take(&mut self.cells);
        let mut removed = Vec::new();
        self.cells = old
            .into_iter()
            .filter_map(|((r, c), v)| {
                if r == at {
                    removed.push((c, v));
                    None
                } else if r > at {
                    Some(((r - 1, c), v))
                } else {
                    Some(((r, c), v))
                }
            })
            .collect();
        self.rows -= 1;
        Ok(removed)
    }

    /// Delete column `at`, returning its stored cells as `(row, value)`
    /// pairs.
    pub fn delete_col(&mut self, at: usize) -> Result<Vec<(usize, String)>, GridError> {
        if at >= self.cols {
            return Err(GridError::IndexOutOfBounds {
                axis: AxisKind::Column,
                index: at,
                count: self.cols,
            });
        }
        let old = std::mem::take(&mut self.cells);
        let mut removed = Vec::new();
        self.cells = old
            .into_iter()
            .filter_map(|((r, c), v)| {
                if c == at {
                    removed.push((r, v));
                    None
                } else if c > at {
                    Some(((r, c - 1), v))
                } else {
                    Some(((r, c), v))
                }
            })
            .collect();
        self.cols -= 1;
        Ok(removed)
    }
}
