//! Error types for level loading, move requests and board invariants
//!
//! Three classes, handled differently by callers:
//! - `LevelError`: malformed level data, reported at load time
//! - `MoveRejection`: an illegal move request, recoverable with no state change
//! - `EngineError`: a broken board invariant, fatal for the running level

use crate::grid::{Cell, Direction, PieceId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a move request was turned down
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum RejectReason {
    #[error("direction {0} is not allowed for this piece")]
    DirectionNotAllowed(Direction),

    #[error("no free cell in that direction")]
    Blocked,

    #[error("piece is already moving")]
    AlreadyMoving,

    #[error("{0} is still moving")]
    AnotherPieceMoving(PieceId),

    #[error("no such piece on the board")]
    UnknownPiece,

    #[error("level is already complete")]
    LevelComplete,

    #[error("move limit reached")]
    OutOfMoves,
}

/// A rejected move request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("move {direction} of {piece} rejected: {reason}")]
pub struct MoveRejection {
    pub piece: PieceId,
    pub direction: Direction,
    pub reason: RejectReason,
}

/// Board invariant violations and engine misuse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("commit called with no pending move")]
    NoPendingMove,

    #[error("{piece} is not on the board")]
    MissingPiece { piece: PieceId },

    #[error("cannot place {piece}: cell {cell} is not part of the grid")]
    InvalidCell { piece: PieceId, cell: Cell },

    #[error("cannot place {piece}: cell {cell} is occupied by {owner}")]
    CellOccupied {
        piece: PieceId,
        owner: PieceId,
        cell: Cell,
    },

    #[error("cell {cell} should belong to {expected} but maps to {found:?}")]
    OccupancyMismatch {
        cell: Cell,
        expected: PieceId,
        found: Option<PieceId>,
    },

    #[error("cell {cell} is owned by {piece} which does not cover it")]
    OrphanedCell { cell: Cell, piece: PieceId },
}

impl EngineError {
    /// True for the programming-error class (anything but caller misuse)
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(self, EngineError::NoPendingMove)
    }
}

/// Either outcome of a combined request-and-commit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error(transparent)]
    Rejected(#[from] MoveRejection),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Shape problems of a single piece definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("length must be 1 or 2, got {0}")]
    InvalidLength(i32),

    #[error("no allowed directions")]
    NoDirections,

    #[error("a length-2 piece must move along a single axis")]
    MixedAxis,
}

/// Malformed level data
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to parse JSON level: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse RON level: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("grid must have at least one row and column, got {rows}x{cols}")]
    EmptyGrid { rows: i32, cols: i32 },

    #[error("cell {cell} lies outside the {rows}x{cols} grid")]
    CellOutOfBounds { cell: Cell, rows: i32, cols: i32 },

    #[error("level has no movable pieces")]
    NoPieces,

    #[error("piece {index}: {source}")]
    PieceShape {
        index: usize,
        #[source]
        source: ShapeError,
    },

    #[error("piece {index}: direction code {code} is not in 0-3")]
    PieceDirection { index: usize, code: i32 },

    #[error("piece {index}: color {color} is outside the palette of {palette_size}")]
    PieceColor {
        index: usize,
        color: i32,
        palette_size: u32,
    },

    #[error("piece {index}: footprint cell {cell} is not a grid cell")]
    PieceOffGrid { index: usize, cell: Cell },

    #[error("piece {index}: footprint cell {cell} overlaps piece {other}")]
    PieceOverlap {
        index: usize,
        other: usize,
        cell: Cell,
    },

    #[error("exit {index}: direction code {code} is not in 0-3")]
    ExitDirection { index: usize, code: i32 },

    #[error("exit {index}: color {color} is outside the palette of {palette_size}")]
    ExitColor {
        index: usize,
        color: i32,
        palette_size: u32,
    },

    #[error("exit {index}: cell {cell} is not a grid cell")]
    ExitOffGrid { index: usize, cell: Cell },

    #[error("level set is empty")]
    EmptyLevelSet,

    #[error(transparent)]
    Engine(#[from] EngineError),
}
