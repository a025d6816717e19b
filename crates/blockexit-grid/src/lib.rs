//! Grid primitives for Block Exit
//!
//! This crate provides the foundational types shared by the board engine:
//! - Cell coordinates (Cell)
//! - Travel directions and direction sets (Direction, DirectionSet, Axis)
//! - Identifiers and colors (PieceId, ExitId, ColorId, Palette)

mod cell;
mod direction;
mod ids;

pub use cell::Cell;
pub use direction::{Axis, Direction, DirectionSet, ParseDirectionError};
pub use ids::{ColorId, ExitId, PALETTE_SIZE, Palette, PieceId};
