//! Slide-until-blocked move resolution

use serde::{Deserialize, Serialize};

use super::grid_index::GridIndex;
use super::piece::{Footprint, Piece};
use crate::error::RejectReason;
use crate::grid::{Cell, Direction, PieceId};

/// A legal, not yet committed relocation of one piece
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub piece: PieceId,
    pub direction: Direction,
    /// Steps that will be traveled (1..=max_steps)
    pub steps: u32,
    /// Farthest legal distance at resolution time
    pub max_steps: u32,
    pub anchor: Cell,
    pub footprint: Vec<Cell>,
}

/// Move resolution - stateless queries against static occupancy
pub struct MoveResolver;

impl MoveResolver {
    /// Number of unit steps `piece` can slide in `direction`
    ///
    /// Ray-casts from the current anchor one step at a time and stops before
    /// the first candidate footprint that leaves the grid or touches another
    /// piece. Cells owned by the mover itself count as free. Directions the
    /// piece does not allow yield 0.
    pub fn max_steps(grid: &GridIndex, piece: &Piece, direction: Direction) -> u32 {
        if !piece.allows(direction) {
            return 0;
        }

        let mut anchor = piece.anchor();
        let mut steps = 0;
        loop {
            let next = anchor.step(direction);
            if !Self::fits(grid, piece, &piece.footprint_at(next)) {
                break;
            }
            steps += 1;
            anchor = next;
        }
        steps
    }

    /// Resolve a move request into a concrete destination
    ///
    /// `requested` of `None` slides as far as possible; explicit values are
    /// clamped into `1..=max_steps`.
    pub fn resolve(
        grid: &GridIndex,
        piece: &Piece,
        direction: Direction,
        requested: Option<u32>,
    ) -> Result<Resolution, RejectReason> {
        if !piece.allows(direction) {
            return Err(RejectReason::DirectionNotAllowed(direction));
        }

        let max_steps = Self::max_steps(grid, piece, direction);
        if max_steps == 0 {
            return Err(RejectReason::Blocked);
        }

        let steps = requested.map_or(max_steps, |s| s.clamp(1, max_steps));
        let anchor = piece.anchor().advance(direction, steps as i32);
        Ok(Resolution {
            piece: piece.id(),
            direction,
            steps,
            max_steps,
            anchor,
            footprint: piece.footprint_at(anchor).into_vec(),
        })
    }

    fn fits(grid: &GridIndex, piece: &Piece, footprint: &Footprint) -> bool {
        footprint
            .iter()
            .all(|&cell| grid.is_free_for(cell, piece.id()))
    }
}
