use gridcanvas_engine::viewport::{COL_HEADER_HEIGHT, ROW_HEADER_WIDTH};
use gridcanvas_engine::Viewport;

use crate::gesture::Gesture;

/// Default distance from a viewport edge that arms auto-scroll during a
/// drag. Overridable via `scroll.edgeThreshold` in the settings file.
pub const EDGE_THRESHOLD: f64 = 10.0;

/// Default pixels scrolled per tick, overridable via
/// `scroll.autoScrollSpeed`.
pub const SCROLL_SPEED: f64 = 20.0;

/// How often the integrator should call `auto_scroll_tick` while the
/// dispatcher reports a pending auto-scroll.
pub const AUTO_SCROLL_INTERVAL_MS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Auto-scroll direction for the pointer at `(x, y)` during `gesture`, or
/// `None` when the pointer is away from the edges. Header drags only
/// scroll along their own axis; a range drag scrolls on both.
pub fn edge_direction(
    gesture: &Gesture,
    viewport: &Viewport,
    x: f64,
    y: f64,
    threshold: f64,
) -> Option<Direction> {
    let near_right = x > viewport.width() - threshold;
    let near_left = x < ROW_HEADER_WIDTH + threshold;
    let near_bottom = y > viewport.height() - threshold;
    let near_top = y < COL_HEADER_HEIGHT + threshold;

    match gesture {
        Gesture::ColumnSelect { .. } => {
            if near_right {
                Some(Direction::Right)
            } else if near_left {
                Some(Direction::Left)
            } else {
                None
            }
        }
        Gesture::RowSelect { .. } => {
            if near_bottom {
                Some(Direction::Down)
            } else if near_top {
                Some(Direction::Up)
            } else {
                None
            }
        }
        Gesture::RangeSelect { .. } => {
            if near_right {
                Some(Direction::Right)
            } else if near_left {
                Some(Direction::Left)
            } else if near_bottom {
                Some(Direction::Down)
            } else if near_top {
                Some(Direction::Up)
            } else {
                None
            }
        }
        Gesture::Idle | Gesture::ColumnResize { .. } | Gesture::RowResize { .. } => None,
    }
}

impl Direction {
    /// The scroll delta one tick applies at the given speed.
    pub fn delta(&self, speed: f64) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -speed),
            Direction::Down => (0.0, speed),
            Direction::Left => (-speed, 0.0),
            Direction::Right => (speed, 0.0),
        }
    }
}
