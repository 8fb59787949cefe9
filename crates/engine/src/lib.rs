pub mod axis;
pub mod cells;
pub mod command;
pub mod error;
pub mod grid;
pub mod history;
pub mod viewport;

pub use axis::Axis;
pub use cells::CellStore;
pub use command::{Command, Side};
pub use error::{AxisKind, GridError};
pub use grid::{Grid, SelectionStats, MAX_COLS, MAX_ROWS};
pub use history::CommandHistory;
pub use viewport::{PixelRect, Viewport, VisibleLine};
