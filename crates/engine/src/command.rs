use crate::error::GridError;
use crate::grid::{Grid, RemovedLine};

/// Which side of the anchor line a structural insert lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

/// An undoable grid mutation. Every variant carries both the new and the
/// prior state it needs, captured when the command is built, so `revert`
/// is exact without consulting anything outside the grid.
///
/// A closed enum rather than a trait object: the command set is fixed and
/// the history moves these by value.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetCellValue {
        row: usize,
        col: usize,
        new_value: String,
        old_value: String,
    },
    ResizeRow {
        index: usize,
        new_size: f64,
        old_size: f64,
    },
    ResizeColumn {
        index: usize,
        new_size: f64,
        old_size: f64,
    },
    InsertRow {
        at: usize,
    },
    InsertColumn {
        at: usize,
    },
    DeleteRow {
        at: usize,
        removed: RemovedLine,
    },
    DeleteColumn {
        at: usize,
        removed: RemovedLine,
    },
}

impl Command {
    /// Cell edit, capturing the current value for undo.
    pub fn set_cell_value(
        grid: &Grid,
        row: usize,
        col: usize,
        new_value: impl Into<String>,
    ) -> Result<Self, GridError> {
        let old_value = grid.cell_text(row, col)?.to_string();
        Ok(Command::SetCellValue {
            row,
            col,
            new_value: new_value.into(),
            old_value,
        })
    }

    pub fn resize_row(grid: &Grid, index: usize, new_size: f64) -> Result<Self, GridError> {
        let old_size = grid.row_size(index)?;
        Ok(Command::ResizeRow { index, new_size, old_size })
    }

    pub fn resize_column(grid: &Grid, index: usize, new_size: f64) -> Result<Self, GridError> {
        let old_size = grid.col_size(index)?;
        Ok(Command::ResizeColumn { index, new_size, old_size })
    }

    /// Insert a row next to `index`. `Before` makes the new row take
    /// `index` itself; `After` puts it just past it.
    pub fn insert_row(index: usize, side: Side) -> Self {
        Command::InsertRow { at: resolve(index, side) }
    }

    pub fn insert_column(index: usize, side: Side) -> Self {
        Command::InsertColumn { at: resolve(index, side) }
    }

    /// Delete row `at`, snapshotting its size override and stored cells so
    /// the inverse restores the line exactly.
    pub fn delete_row(grid: &Grid, at: usize) -> Result<Self, GridError> {
        let removed = grid.snapshot_row(at)?;
        Ok(Command::DeleteRow { at, removed })
    }

    pub fn delete_column(grid: &Grid, at: usize) -> Result<Self, GridError> {
        let removed = grid.snapshot_col(at)?;
        Ok(Command::DeleteColumn { at, removed })
    }

    pub fn apply(&self, grid: &mut Grid) -> Result<(), GridError> {
        match self {
            Command::SetCellValue { row, col, new_value, .. } => {
                grid.set_cell_text(*row, *col, new_value.clone())
            }
            Command::ResizeRow { index, new_size, .. } => grid.set_row_size(*index, *new_size),
            Command::ResizeColumn { index, new_size, .. } => grid.set_col_size(*index, *new_size),
            Command::InsertRow { at } => grid.insert_row(*at),
            Command::InsertColumn { at } => grid.insert_col(*at),
            Command::DeleteRow { at, .. } => grid.delete_row(*at).map(|_| ()),
            Command::DeleteColumn { at, .. } => grid.delete_col(*at).map(|_| ()),
        }
    }

    pub fn revert(&self, grid: &mut Grid) -> Result<(), GridError> {
        match self {
            Command::SetCellValue { row, col, old_value, .. } => {
                grid.set_cell_text(*row, *col, old_value.clone())
            }
            Command::ResizeRow { index, old_size, .. } => grid.set_row_size(*index, *old_size),
            Command::ResizeColumn { index, old_size, .. } => grid.set_col_size(*index, *old_size),
            Command::InsertRow { at } => grid.delete_row(*at).map(|_| ()),
            Command::InsertColumn { at } => grid.delete_col(*at).map(|_| ()),
            Command::DeleteRow { at, removed } => grid.restore_row(*at, removed),
            Command::DeleteColumn { at, removed } => grid.restore_col(*at, removed),
        }
    }
}

fn resolve(index: usize, side: Side) -> usize {
    match side {
        Side::Before => index,
        Side::After => index + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cell_value_round_trip() {
        let mut grid = Grid::new(10, 10);
        grid.set_cell_text(1, 1, "old").unwrap();
        let cmd = Command::set_cell_value(&grid, 1, 1, "new").unwrap();
        cmd.apply(&mut grid).unwrap();
        assert_eq!(grid.cell_text(1, 1).unwrap(), "new");
        cmd.revert(&mut grid).unwrap();
        assert_eq!(grid.cell_text(1, 1).unwrap(), "old");
    }

    #[test]
    fn test_resize_column_round_trip() {
        let mut grid = Grid::new(10, 10);
        let cmd = Command::resize_column(&grid, 2, 150.0).unwrap();
        cmd.apply(&mut grid).unwrap();
        assert_eq!(grid.col_size(2).unwrap(), 150.0);
        cmd.revert(&mut grid).unwrap();
        assert_eq!(grid.col_size(2).unwrap(), 80.0);
        assert_eq!(grid.cols().override_count(), 0);
    }

    #[test]
    fn test_insert_side_convention() {
        assert_eq!(Command::insert_row(4, Side::Before), Command::InsertRow { at: 4 });
        assert_eq!(Command::insert_row(4, Side::After), Command::InsertRow { at: 5 });
    }

    #[test]
    fn test_insert_row_invert_restores_everything() {
        let mut grid = Grid::new(20, 10);
        grid.set_cell_text(4, 0, "moves").unwrap();
        grid.set_row_size(4, 50.0).unwrap();
        let cmd = Command::insert_row(4, Side::Before);
        cmd.apply(&mut grid).unwrap();
        assert_eq!(grid.row_count(), 21);
        assert_eq!(grid.cell_text(5, 0).unwrap(), "moves");
        assert_eq!(grid.row_size(5).unwrap(), 50.0);
        cmd.revert(&mut grid).unwrap();
        assert_eq!(grid.row_count(), 20);
        assert_eq!(grid.cell_text(4, 0).unwrap(), "moves");
        assert_eq!(grid.row_size(4).unwrap(), 50.0);
    }

    #[test]
    fn test_delete_row_invert_restores_cells_and_override() {
        let mut grid = Grid::new(20, 10);
        grid.set_cell_text(3, 2, "keep me").unwrap();
        grid.set_row_size(3, 99.0).unwrap();
        let cmd = Command::delete_row(&grid, 3).unwrap();
        cmd.apply(&mut grid).unwrap();
        assert_eq!(grid.row_count(), 19);
        assert_eq!(grid.cell_text(3, 2).unwrap(), "");
        cmd.revert(&mut grid).unwrap();
        assert_eq!(grid.row_count(), 20);
        assert_eq!(grid.cell_text(3, 2).unwrap(), "keep me");
        assert_eq!(grid.row_size(3).unwrap(), 99.0);
    }

    #[test]
    fn test_apply_out_of_bounds_propagates() {
        let mut grid = Grid::new(5, 5);
        let cmd = Command::SetCellValue {
            row: 50,
            col: 0,
            new_value: "x".into(),
            old_value: String::new(),
        };
        assert!(cmd.apply(&mut grid).is_err());
    }
}
