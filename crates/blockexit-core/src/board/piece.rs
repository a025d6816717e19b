//! Movable pieces and their footprints

use crate::error::ShapeError;
use crate::grid::{Axis, Cell, ColorId, Direction, DirectionSet, PieceId};
use smallvec::SmallVec;

/// Cells covered by a piece, anchor first
pub type Footprint = SmallVec<[Cell; 2]>;

/// Longest piece the board supports
pub const MAX_PIECE_LENGTH: i32 = 2;

/// A movable piece
///
/// Only the anchor is stored; the footprint is derived from the anchor,
/// the length and the axis. A length-2 piece always has an axis, while a
/// length-1 piece may be unconstrained (`axis() == None`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    anchor: Cell,
    length: u8,
    color: ColorId,
    allowed: DirectionSet,
    axis: Option<Axis>,
    /// Direction of the last committed move (None before the first move)
    last_direction: Option<Direction>,
    /// Set between an accepted request and its commit or abort
    is_moving: bool,
}

impl Piece {
    pub fn new(
        id: PieceId,
        anchor: Cell,
        length: i32,
        color: ColorId,
        allowed: DirectionSet,
    ) -> Result<Self, ShapeError> {
        if !(1..=MAX_PIECE_LENGTH).contains(&length) {
            return Err(ShapeError::InvalidLength(length));
        }
        if allowed.is_empty() {
            return Err(ShapeError::NoDirections);
        }
        let axis = allowed.axis();
        if length > 1 && axis.is_none() {
            return Err(ShapeError::MixedAxis);
        }

        Ok(Self {
            id,
            anchor,
            length: length as u8,
            color,
            allowed,
            axis,
            last_direction: None,
            is_moving: false,
        })
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn anchor(&self) -> Cell {
        self.anchor
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn color(&self) -> ColorId {
        self.color
    }

    pub fn allowed(&self) -> DirectionSet {
        self.allowed
    }

    pub fn axis(&self) -> Option<Axis> {
        self.axis
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn allows(&self, direction: Direction) -> bool {
        self.allowed.allows(direction)
    }

    /// Cells currently covered
    pub fn footprint(&self) -> Footprint {
        self.footprint_at(self.anchor)
    }

    /// Cells the piece would cover if anchored at `anchor`
    ///
    /// The second cell always extends along the piece's own axis,
    /// independent of any travel direction.
    pub fn footprint_at(&self, anchor: Cell) -> Footprint {
        let mut cells = Footprint::new();
        cells.push(anchor);
        if let Some(axis) = self.axis {
            let (d_row, d_col) = axis.extension();
            for i in 1..self.length as i32 {
                cells.push(anchor.offset(d_row * i, d_col * i));
            }
        }
        cells
    }

    pub(crate) fn set_moving(&mut self, moving: bool) {
        self.is_moving = moving;
    }

    pub(crate) fn commit_move(&mut self, anchor: Cell, direction: Direction) {
        self.anchor = anchor;
        self.last_direction = Some(direction);
        self.is_moving = false;
    }
}
