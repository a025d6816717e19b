//! Cell coordinates

use crate::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A grid cell addressed by (row, col)
///
/// Row 0 is the top row, so `Direction::Up` decreases the row.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Cell shifted by a raw (row, col) delta
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Neighbor one unit step away in `direction`
    pub fn step(self, direction: Direction) -> Self {
        self.advance(direction, 1)
    }

    /// Cell reached after `steps` unit steps in `direction`
    pub fn advance(self, direction: Direction, steps: i32) -> Self {
        let (d_row, d_col) = direction.step();
        self.offset(d_row * steps, d_col * steps)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
