use gridcanvas_config::Settings;
use gridcanvas_engine::viewport::{COL_HEADER_HEIGHT, ROW_HEADER_WIDTH};
use gridcanvas_engine::{Command, GridError, Side};

use crate::autoscroll::{self, Direction, EDGE_THRESHOLD, SCROLL_SPEED};
use crate::gesture::{self, CursorHint, Gesture, MIN_COL_WIDTH, MIN_ROW_HEIGHT};
use crate::session::GridState;

/// Default pixels per arrow-key scroll step, overridable via
/// `scroll.arrowStep`.
pub const ARROW_SCROLL: f64 = 50.0;

/// Interaction knobs read from the settings file. Defaults match the
/// module constants they override.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub arrow_scroll_step: f64,
    pub auto_scroll_speed: f64,
    pub edge_threshold: f64,
    pub min_column_width: f64,
    pub min_row_height: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arrow_scroll_step: ARROW_SCROLL,
            auto_scroll_speed: SCROLL_SPEED,
            edge_threshold: EDGE_THRESHOLD,
            min_column_width: MIN_COL_WIDTH,
            min_row_height: MIN_ROW_HEIGHT,
        }
    }
}

impl From<&Settings> for Tuning {
    fn from(settings: &Settings) -> Self {
        Self {
            arrow_scroll_step: settings.arrow_scroll_step,
            auto_scroll_speed: settings.auto_scroll_speed,
            edge_threshold: settings.edge_threshold,
            min_column_width: settings.min_column_width,
            min_row_height: settings.min_row_height,
        }
    }
}

/// What the embedder should do after an input callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Response {
    pub redraw: bool,
    /// Cell whose text editor should be opened.
    pub edit_started: Option<(usize, usize)>,
}

impl Response {
    fn none() -> Self {
        Self::default()
    }

    fn redraw() -> Self {
        Self { redraw: true, edit_started: None }
    }

    fn edit(row: usize, col: usize) -> Self {
        Self { redraw: true, edit_started: Some((row, col)) }
    }
}

/// Keyboard input the dispatcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Char(char),
}

/// Routes pointer, wheel, and keyboard input to grid operations.
///
/// Pointer-down walks a fixed hit-test chain (column resize, row resize,
/// column select, row select, range select); the first hit owns the
/// gesture until pointer-up. Selection changes apply directly and are not
/// undoable; resizes apply live during the drag and commit one command on
/// pointer-up. Between gestures the dispatcher keeps only the last
/// pointer position and last selected cell.
#[derive(Debug, Default)]
pub struct Dispatcher {
    tuning: Tuning,
    gesture: Gesture,
    auto_scroll: Option<Direction>,
    last_pointer: (f64, f64),
    last_selected: Option<(usize, usize)>,
    editing: Option<(usize, usize)>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher whose interaction knobs come from the settings file.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_tuning(Tuning::from(settings))
    }

    pub fn with_tuning(tuning: Tuning) -> Self {
        Self { tuning, ..Self::default() }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Cell currently being edited, if any.
    pub fn editing(&self) -> Option<(usize, usize)> {
        self.editing
    }

    /// True while an edge auto-scroll is armed; the integrator should call
    /// [`auto_scroll_tick`](Self::auto_scroll_tick) every
    /// [`AUTO_SCROLL_INTERVAL_MS`](crate::autoscroll::AUTO_SCROLL_INTERVAL_MS).
    pub fn wants_auto_scroll(&self) -> bool {
        self.auto_scroll.is_some()
    }

    pub fn pointer_down(&mut self, state: &mut GridState, x: f64, y: f64) -> Result<Response, GridError> {
        if x < 0.0 || y < 0.0 {
            return Ok(Response::none());
        }
        self.last_pointer = (x, y);

        if let Some(index) = gesture::col_resize_hit(state, x, y) {
            let initial_size = state.grid.col_size(index)?;
            self.gesture = Gesture::ColumnResize { index, initial_size };
            log::debug!("column resize gesture on {}", index);
            return Ok(Response::none());
        }

        if let Some(index) = gesture::row_resize_hit(state, x, y) {
            let initial_size = state.grid.row_size(index)?;
            self.gesture = Gesture::RowResize { index, initial_size };
            log::debug!("row resize gesture on {}", index);
            return Ok(Response::none());
        }

        if gesture::in_col_header(x, y) {
            let col = state.grid.cols().index_at_offset(state.viewport.content_x(x));
            self.gesture = Gesture::ColumnSelect { anchor: col, current: col };
            state.grid.selection_mut().select_column(col);
            self.last_selected = Some((0, col));
            return Ok(Response::redraw());
        }

        if gesture::in_row_header(x, y) {
            let row = state.grid.rows().index_at_offset(state.viewport.content_y(y));
            self.gesture = Gesture::RowSelect { anchor: row, current: row };
            state.grid.selection_mut().select_row(row);
            self.last_selected = Some((row, 0));
            return Ok(Response::redraw());
        }

        if let Some((row, col)) = state.viewport.cell_at(&state.grid, x, y) {
            self.gesture = Gesture::RangeSelect { anchor: (row, col) };
            state.grid.selection_mut().select_cell(row, col);
            self.last_selected = Some((row, col));
            return Ok(Response::redraw());
        }

        Ok(Response::none())
    }

    pub fn pointer_move(&mut self, state: &mut GridState, x: f64, y: f64) -> Result<Response, GridError> {
        self.last_pointer = (x, y);
        self.auto_scroll = autoscroll::edge_direction(
            &self.gesture,
            &state.viewport,
            x,
            y,
            self.tuning.edge_threshold,
        );

        match self.gesture {
            Gesture::ColumnResize { index, .. } => {
                let size = (state.viewport.content_x(x) - state.grid.cols().offset(index))
                    .max(self.tuning.min_column_width);
                state.grid.set_col_size(index, size)?;
                Ok(Response::redraw())
            }
            Gesture::RowResize { index, .. } => {
                let size = (state.viewport.content_y(y) - state.grid.rows().offset(index))
                    .max(self.tuning.min_row_height);
                state.grid.set_row_size(index, size)?;
                Ok(Response::redraw())
            }
            Gesture::ColumnSelect { anchor, current } => {
                let col = state.grid.cols().index_at_offset(state.viewport.content_x(x));
                if col == current {
                    return Ok(Response::none());
                }
                state.grid.selection_mut().extend_columns_to(anchor, col);
                self.gesture = Gesture::ColumnSelect { anchor, current: col };
                Ok(Response::redraw())
            }
            Gesture::RowSelect { anchor, current } => {
                let row = state.grid.rows().index_at_offset(state.viewport.content_y(y));
                if row == current {
                    return Ok(Response::none());
                }
                state.grid.selection_mut().extend_rows_to(anchor, row);
                self.gesture = Gesture::RowSelect { anchor, current: row };
                Ok(Response::redraw())
            }
            Gesture::RangeSelect { anchor } => {
                match state.viewport.cell_at(&state.grid, x, y) {
                    Some(cell) => {
                        state.grid.selection_mut().extend_range_to(anchor, cell);
                        Ok(Response::redraw())
                    }
                    None => Ok(Response::none()),
                }
            }
            Gesture::Idle => Ok(Response::none()),
        }
    }

    pub fn pointer_up(&mut self, state: &mut GridState, x: f64, y: f64) -> Result<Response, GridError> {
        self.last_pointer = (x, y);
        self.finish_gesture(state)
    }

    /// Implicit pointer-up for focus loss or window blur. Ends the gesture
    /// exactly as a real pointer-up at the last position would, and always
    /// clears any armed auto-scroll.
    pub fn cancel_gesture(&mut self, state: &mut GridState) -> Result<Response, GridError> {
        self.finish_gesture(state)
    }

    fn finish_gesture(&mut self, state: &mut GridState) -> Result<Response, GridError> {
        self.auto_scroll = None;
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::ColumnResize { index, initial_size } => {
                let final_size = state.grid.col_size(index)?;
                if final_size != initial_size {
                    log::debug!("column {} resized {} -> {}", index, initial_size, final_size);
                    state.execute(Command::ResizeColumn {
                        index,
                        new_size: final_size,
                        old_size: initial_size,
                    })?;
                }
                Ok(Response::redraw())
            }
            Gesture::RowResize { index, initial_size } => {
                let final_size = state.grid.row_size(index)?;
                if final_size != initial_size {
                    log::debug!("row {} resized {} -> {}", index, initial_size, final_size);
                    state.execute(Command::ResizeRow {
                        index,
                        new_size: final_size,
                        old_size: initial_size,
                    })?;
                }
                Ok(Response::redraw())
            }
            _ => Ok(Response::none()),
        }
    }

    /// Wheel scrolling; shift swaps the axes for horizontal scrolling on a
    /// plain mouse wheel.
    pub fn wheel(&mut self, state: &mut GridState, dx: f64, dy: f64, shift: bool) -> Response {
        if shift {
            state.viewport.scroll_by(&state.grid, dy, 0.0);
        } else {
            state.viewport.scroll_by(&state.grid, dx, dy);
        }
        Response::redraw()
    }

    pub fn key_down(
        &mut self,
        state: &mut GridState,
        key: Key,
        ctrl: bool,
        shift: bool,
    ) -> Result<Response, GridError> {
        // While editing, keystrokes belong to the text editor.
        if self.editing.is_some() {
            return Ok(Response::none());
        }

        if ctrl {
            if let Key::Char(c) = key {
                if c.eq_ignore_ascii_case(&'z') {
                    let changed = if shift { state.redo()? } else { state.undo()? };
                    return Ok(if changed { Response::redraw() } else { Response::none() });
                }
            }
            return Ok(Response::none());
        }

        let step = self.tuning.arrow_scroll_step;
        match key {
            Key::ArrowRight => {
                state.viewport.scroll_by(&state.grid, step, 0.0);
                Ok(Response::redraw())
            }
            Key::ArrowLeft => {
                state.viewport.scroll_by(&state.grid, -step, 0.0);
                Ok(Response::redraw())
            }
            Key::ArrowDown => {
                state.viewport.scroll_by(&state.grid, 0.0, step);
                Ok(Response::redraw())
            }
            Key::ArrowUp => {
                state.viewport.scroll_by(&state.grid, 0.0, -step);
                Ok(Response::redraw())
            }
            Key::Char(c) if !c.is_control() => match self.last_selected {
                Some((row, col)) => self.begin_edit(state, row, col),
                None => Ok(Response::none()),
            },
            Key::Char(_) => Ok(Response::none()),
        }
    }

    pub fn double_click(&mut self, state: &mut GridState, x: f64, y: f64) -> Result<Response, GridError> {
        match state.viewport.cell_at(&state.grid, x, y) {
            Some((row, col)) => self.begin_edit(state, row, col),
            None => Ok(Response::none()),
        }
    }

    /// Open an edit session on a cell. The embedder shows the editor and
    /// later calls [`commit_edit`](Self::commit_edit) or
    /// [`cancel_edit`](Self::cancel_edit).
    pub fn begin_edit(&mut self, state: &mut GridState, row: usize, col: usize) -> Result<Response, GridError> {
        state.grid.cell_text(row, col)?;
        state.grid.selection_mut().select_cell(row, col);
        self.last_selected = Some((row, col));
        self.editing = Some((row, col));
        Ok(Response::edit(row, col))
    }

    /// Close the edit session, committing an undoable cell edit only when
    /// the text actually changed.
    pub fn commit_edit(&mut self, state: &mut GridState, text: &str) -> Result<Response, GridError> {
        let Some((row, col)) = self.editing.take() else {
            return Ok(Response::none());
        };
        if state.grid.cell_text(row, col)? == text {
            return Ok(Response::none());
        }
        let command = Command::set_cell_value(&state.grid, row, col, text)?;
        state.execute(command)?;
        Ok(Response::redraw())
    }

    pub fn cancel_edit(&mut self) -> Response {
        self.editing = None;
        Response::redraw()
    }

    /// One cooperative auto-scroll step. Scrolls by the tuned speed,
    /// clamped by the viewport, and re-derives the drag selection from the
    /// pointer's resting position. A no-op once the scroll is pinned at
    /// its limit or the gesture has ended.
    pub fn auto_scroll_tick(&mut self, state: &mut GridState) -> Result<Response, GridError> {
        let Some(direction) = self.auto_scroll else {
            return Ok(Response::none());
        };
        let before = (state.viewport.scroll_x(), state.viewport.scroll_y());
        let (dx, dy) = direction.delta(self.tuning.auto_scroll_speed);
        state.viewport.scroll_by(&state.grid, dx, dy);
        if (state.viewport.scroll_x(), state.viewport.scroll_y()) == before {
            return Ok(Response::none());
        }

        // keep extending toward the pointer, held just clear of the headers
        let x = self.last_pointer.0.max(ROW_HEADER_WIDTH + 1.0);
        let y = self.last_pointer.1.max(COL_HEADER_HEIGHT + 1.0);
        match self.gesture {
            Gesture::ColumnSelect { anchor, .. } => {
                let col = state.grid.cols().index_at_offset(state.viewport.content_x(x));
                state.grid.selection_mut().extend_columns_to(anchor, col);
                self.gesture = Gesture::ColumnSelect { anchor, current: col };
            }
            Gesture::RowSelect { anchor, .. } => {
                let row = state.grid.rows().index_at_offset(state.viewport.content_y(y));
                state.grid.selection_mut().extend_rows_to(anchor, row);
                self.gesture = Gesture::RowSelect { anchor, current: row };
            }
            Gesture::RangeSelect { anchor } => {
                if let Some(cell) = state.viewport.cell_at(&state.grid, x, y) {
                    state.grid.selection_mut().extend_range_to(anchor, cell);
                }
            }
            _ => {}
        }
        Ok(Response::redraw())
    }

    /// Cursor feedback for an idle hover.
    pub fn cursor_hint(&self, state: &GridState, x: f64, y: f64) -> CursorHint {
        if gesture::col_resize_hit(state, x, y).is_some() {
            CursorHint::ColResize
        } else if gesture::row_resize_hit(state, x, y).is_some() {
            CursorHint::RowResize
        } else {
            CursorHint::Cell
        }
    }

    /// Insert a row next to the selected row span. No-op unless the active
    /// selection is a row selection. The originally selected row stays
    /// selected afterwards.
    pub fn insert_row(&mut self, state: &mut GridState, side: Side) -> Result<Response, GridError> {
        let Some((start, _)) = state.grid.selected_rows() else {
            return Ok(Response::none());
        };
        state.execute(Command::insert_row(start, side))?;
        let keep = match side {
            Side::Before => start + 1,
            Side::After => start,
        };
        state.grid.selection_mut().select_row(keep);
        self.last_selected = Some((keep, 0));
        Ok(Response::redraw())
    }

    /// Column twin of [`insert_row`](Self::insert_row).
    pub fn insert_column(&mut self, state: &mut GridState, side: Side) -> Result<Response, GridError> {
        let Some((start, _)) = state.grid.selected_cols() else {
            return Ok(Response::none());
        };
        state.execute(Command::insert_column(start, side))?;
        let keep = match side {
            Side::Before => start + 1,
            Side::After => start,
        };
        state.grid.selection_mut().select_column(keep);
        self.last_selected = Some((0, keep));
        Ok(Response::redraw())
    }

    /// Delete the first selected row and clear the selection.
    pub fn delete_row(&mut self, state: &mut GridState) -> Result<Response, GridError> {
        let Some((start, _)) = state.grid.selected_rows() else {
            return Ok(Response::none());
        };
        let command = Command::delete_row(&state.grid, start)?;
        state.execute(command)?;
        state.grid.selection_mut().clear();
        self.last_selected = None;
        Ok(Response::redraw())
    }

    /// Delete the first selected column and clear the selection.
    pub fn delete_column(&mut self, state: &mut GridState) -> Result<Response, GridError> {
        let Some((start, _)) = state.grid.selected_cols() else {
            return Ok(Response::none());
        };
        let command = Command::delete_column(&state.grid, start)?;
        state.execute(command)?;
        state.grid.selection_mut().clear();
        self.last_selected = None;
        Ok(Response::redraw())
    }
}
