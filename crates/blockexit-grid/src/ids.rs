//! Piece, exit and color identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a piece for the lifetime of a level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// Identifier of an exit within a level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExitId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece#{}", self.0)
    }
}

impl fmt::Display for ExitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exit#{}", self.0)
    }
}

/// Color index shared by pieces and exits
pub type ColorId = u32;

/// Number of colors in the built-in palette
pub const PALETTE_SIZE: u32 = 5;

/// Built-in color IDs
pub struct Palette;

impl Palette {
    pub const BLUE: ColorId = 0;
    pub const WHITE: ColorId = 1;
    pub const GREEN: ColorId = 2;
    pub const ORANGE: ColorId = 3;
    pub const RED: ColorId = 4;

    /// Display name of a color, if it is part of the built-in palette
    pub fn name(color: ColorId) -> Option<&'static str> {
        match color {
            Self::BLUE => Some("blue"),
            Self::WHITE => Some("white"),
            Self::GREEN => Some("green"),
            Self::ORANGE => Some("orange"),
            Self::RED => Some("red"),
            _ => None,
        }
    }
}
