use std::fmt;

use serde::{Deserialize, Serialize};

/// Which geometry axis an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    Row,
    Column,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisKind::Row => write!(f, "row"),
            AxisKind::Column => write!(f, "column"),
        }
    }
}

/// Validation failures from the geometry tables and the cell store.
///
/// An out-of-bounds index reaching a command's `apply` is a caller bug;
/// these propagate with `?` and nothing downstream catches them.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    IndexOutOfBounds {
        axis: AxisKind,
        index: usize,
        count: usize,
    },
    InvalidSize {
        size: f64,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::IndexOutOfBounds { axis, index, count } => {
                write!(f, "{} index {} out of bounds (count {})", axis, index, count)
            }
            GridError::InvalidSize { size } => {
                write!(f, "invalid size {}: sizes must be positive", size)
            }
        }
    }
}

impl std::error::Error for GridError {}
