use crate::command::Command;
use crate::error::GridError;
use crate::grid::Grid;

const MAX_STACK_SIZE: usize = 1000;

/// Bounded undo/redo stacks over [`Command`]s. `execute` is the only
/// mutation entry point for undoable edits; applying a command outside the
/// history would desync the stacks from the grid.
#[derive(Debug, Default)]
pub struct CommandHistory {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    max_entries: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::with_capacity(MAX_STACK_SIZE)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries,
        }
    }

    /// Apply `command` and record it. The oldest entry is dropped past the
    /// cap, and any redo tail is discarded. Errors from `apply` propagate
    /// without recording anything.
    pub fn execute(&mut self, grid: &mut Grid, command: Command) -> Result<(), GridError> {
        command.apply(grid)?;
        self.redo_stack.clear();
        if self.undo_stack.len() >= self.max_entries {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(command);
        Ok(())
    }

    /// Revert the most recent command. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self, grid: &mut Grid) -> Result<bool, GridError> {
        match self.undo_stack.pop() {
            Some(command) => {
                command.revert(grid)?;
                self.redo_stack.push(command);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-apply the most recently undone command.
    pub fn redo(&mut self, grid: &mut Grid) -> Result<bool, GridError> {
        match self.redo_stack.pop() {
            Some(command) => {
                command.apply(grid)?;
                self.undo_stack.push(command);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
