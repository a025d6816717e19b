//! Board engine for Block Exit
//!
//! `board` holds the occupancy index, move resolution, exits and the
//! puzzle engine; `levels` loads and validates level files and drives
//! progression through a level set.

pub mod board;
pub mod error;
pub mod levels;

// Re-export from blockexit-grid so callers need a single dependency
pub mod grid {
    pub use blockexit_grid::*;
}

pub use error::{EngineError, LevelError, MoveError, MoveRejection, RejectReason, ShapeError};
