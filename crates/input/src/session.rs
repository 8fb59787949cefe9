use gridcanvas_config::Settings;
use gridcanvas_engine::{Command, CommandHistory, Grid, GridError, Viewport};

/// The mutable state one interaction session works on: the grid itself,
/// the scroll viewport, and the undo history. Handlers borrow this per
/// call and retain nothing, so there is exactly one owner and no locking.
#[derive(Debug)]
pub struct GridState {
    pub grid: Grid,
    pub viewport: Viewport,
    pub history: CommandHistory,
}

impl GridState {
    pub fn new(grid: Grid, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            grid,
            viewport: Viewport::new(viewport_width, viewport_height),
            history: CommandHistory::new(),
        }
    }

    /// A session sized from the settings file. Pair with
    /// [`Dispatcher::from_settings`](crate::Dispatcher::from_settings) so
    /// the interaction knobs come from the same source.
    pub fn from_settings(settings: &Settings, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            grid: Grid::with_defaults(
                settings.rows,
                settings.columns,
                settings.default_row_height,
                settings.default_column_width,
            ),
            viewport: Viewport::new(viewport_width, viewport_height),
            history: CommandHistory::with_capacity(settings.history_max_entries),
        }
    }

    /// Run an undoable command against the grid.
    pub fn execute(&mut self, command: Command) -> Result<(), GridError> {
        self.history.execute(&mut self.grid, command)
    }

    pub fn undo(&mut self) -> Result<bool, GridError> {
        self.history.undo(&mut self.grid)
    }

    pub fn redo(&mut self) -> Result<bool, GridError> {
        self.history.redo(&mut self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_shapes_the_grid() {
        let mut settings = Settings::default();
        settings.rows = 200;
        settings.columns = 40;
        settings.default_row_height = 30.0;
        let state = GridState::from_settings(&settings, 800.0, 600.0);
        assert_eq!(state.grid.row_count(), 200);
        assert_eq!(state.grid.col_count(), 40);
        assert_eq!(state.grid.row_size(0).unwrap(), 30.0);
        assert_eq!(state.grid.col_size(0).unwrap(), 80.0);
    }

    #[test]
    fn test_execute_and_undo_through_the_session() {
        let mut state = GridState::new(Grid::new(10, 10), 800.0, 600.0);
        let cmd = Command::set_cell_value(&state.grid, 0, 0, "x").unwrap();
        state.execute(cmd).unwrap();
        assert_eq!(state.grid.cell_text(0, 0).unwrap(), "x");
        assert!(state.undo().unwrap());
        assert_eq!(state.grid.cell_text(0, 0).unwrap(), "");
        assert!(state.redo().unwrap());
        assert_eq!(state.grid.cell_text(0, 0).unwrap(), "x");
    }
}
