//! Colored, directional exits

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::piece::Piece;
use crate::grid::{Cell, ColorId, Direction, ExitId};

/// A goal cell that retires matching pieces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    pub cell: Cell,
    /// Direction a piece must be traveling to leave through this exit
    pub direction: Direction,
    pub color: ColorId,
}

/// All exits of a level, indexed by cell
///
/// Exit IDs are positions in the order the exits were supplied.
#[derive(Clone, Debug, Default)]
pub struct ExitRegistry {
    exits: Vec<Exit>,
    by_cell: AHashMap<Cell, SmallVec<[ExitId; 1]>>,
}

impl ExitRegistry {
    pub fn new(exits: impl IntoIterator<Item = Exit>) -> Self {
        let exits: Vec<Exit> = exits.into_iter().collect();
        let mut by_cell: AHashMap<Cell, SmallVec<[ExitId; 1]>> = AHashMap::new();
        for (index, exit) in exits.iter().enumerate() {
            by_cell
                .entry(exit.cell)
                .or_default()
                .push(ExitId(index as u32));
        }
        Self { exits, by_cell }
    }

    pub fn get(&self, id: ExitId) -> Option<&Exit> {
        self.exits.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.exits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExitId, &Exit)> {
        self.exits
            .iter()
            .enumerate()
            .map(|(index, exit)| (ExitId(index as u32), exit))
    }

    /// Exits located on `cell`, in ID order
    pub fn exits_at(&self, cell: Cell) -> impl Iterator<Item = ExitId> + '_ {
        self.by_cell.get(&cell).into_iter().flatten().copied()
    }

    /// Exit the piece satisfies in its current position, if any
    ///
    /// An exit matches when its color equals the piece's color, its cell is
    /// covered by the piece's footprint and the piece's last committed move
    /// traveled in the exit's direction. A piece that has never moved
    /// matches nothing. Footprint order (anchor first) then exit ID order
    /// decides between several candidates.
    pub fn matching_exit(&self, piece: &Piece) -> Option<ExitId> {
        let last_direction = piece.last_direction()?;
        piece
            .footprint()
            .iter()
            .flat_map(|&cell| self.exits_at(cell))
            .find(|&id| {
                self.get(id).is_some_and(|exit| {
                    exit.color == piece.color() && exit.direction == last_direction
                })
            })
    }
}
