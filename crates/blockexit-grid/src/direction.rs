//! Travel directions, axes and direction sets

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the four quantized travel directions
///
/// Level files encode these as integers: Up=0, Right=1, Down=2, Left=3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// Movement axis of a piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Moves along rows (Up/Down), extends toward +row
    Vertical,
    /// Moves along columns (Left/Right), extends toward +col
    Horizontal,
}

impl Direction {
    /// All directions in level-file code order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Decode a level-file direction code (0-3)
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Direction::Up),
            1 => Some(Direction::Right),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// Unit step as (d_row, d_col)
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Right | Direction::Left => Axis::Horizontal,
        }
    }

    /// Single-letter shorthand (U, R, D, L)
    pub fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Right => 'R',
            Direction::Down => 'D',
            Direction::Left => 'L',
        }
    }
}

impl Axis {
    /// (d_row, d_col) from a piece's anchor to its second cell
    pub fn extension(self) -> (i32, i32) {
        match self {
            Axis::Vertical => (1, 0),
            Axis::Horizontal => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction '{0}' (expected up/right/down/left, U/R/D/L or 0-3)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "u" | "up" | "0" => Ok(Direction::Up),
            "r" | "right" | "1" => Ok(Direction::Right),
            "d" | "down" | "2" => Ok(Direction::Down),
            "l" | "left" | "3" => Ok(Direction::Left),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

bitflags! {
    /// Subset of directions a piece may travel in
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DirectionSet: u8 {
        const UP = 1 << 0;
        const RIGHT = 1 << 1;
        const DOWN = 1 << 2;
        const LEFT = 1 << 3;

        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
        const HORIZONTAL = Self::RIGHT.bits() | Self::LEFT.bits();
    }
}

impl DirectionSet {
    pub fn of(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::UP,
            Direction::Right => Self::RIGHT,
            Direction::Down => Self::DOWN,
            Direction::Left => Self::LEFT,
        }
    }

    pub fn allows(self, direction: Direction) -> bool {
        self.contains(Self::of(direction))
    }

    /// Allowed directions in code order
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.allows(*d))
    }

    /// Axis the set is confined to
    ///
    /// `None` for the empty set and for sets mixing both axes.
    pub fn axis(self) -> Option<Axis> {
        if self.is_empty() {
            None
        } else if Self::VERTICAL.contains(self) {
            Some(Axis::Vertical)
        } else if Self::HORIZONTAL.contains(self) {
            Some(Axis::Horizontal)
        } else {
            None
        }
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, d| set | Self::of(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_code(direction.code()), Some(direction));
        }
        assert_eq!(Direction::from_code(4), None);
        assert_eq!(Direction::from_code(-1), None);
    }

    #[test]
    fn test_opposites_share_axis() {
        for direction in Direction::ALL {
            let opposite = direction.opposite();
            assert_ne!(direction, opposite);
            assert_eq!(direction.axis(), opposite.axis());
            assert_eq!(opposite.opposite(), direction);

            let (r, c) = direction.step();
            assert_eq!(opposite.step(), (-r, -c));
        }
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("R".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(" 2 ".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("Left".parse::<Direction>(), Ok(Direction::Left));
        assert!("north".parse::<Direction>().is_err());
    }

    #[test]
    fn test_set_axis() {
        let vertical: DirectionSet = [Direction::Up, Direction::Down].into_iter().collect();
        assert_eq!(vertical.axis(), Some(Axis::Vertical));

        let down_only = DirectionSet::of(Direction::Down);
        assert_eq!(down_only.axis(), Some(Axis::Vertical));

        assert_eq!(DirectionSet::HORIZONTAL.axis(), Some(Axis::Horizontal));
        assert_eq!(DirectionSet::all().axis(), None);
        assert_eq!(DirectionSet::empty().axis(), None);
    }

    #[test]
    fn test_set_directions_in_code_order() {
        let set = DirectionSet::LEFT | DirectionSet::UP;
        let dirs: Vec<_> = set.directions().collect();
        assert_eq!(dirs, vec![Direction::Up, Direction::Left]);
        assert!(set.allows(Direction::Up));
        assert!(!set.allows(Direction::Down));
    }
}
