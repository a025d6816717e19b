//! Valid cells and current occupancy

use ahash::{AHashMap, AHashSet};

use super::piece::Footprint;
use crate::error::EngineError;
use crate::grid::{Cell, PieceId};

/// Set of valid cells plus a cell -> piece occupancy map
///
/// Occupancy is kept in lock-step with piece footprints: the engine only
/// changes it through `place` and `vacate`. A reverse map (piece -> cells)
/// makes vacating independent of board size.
#[derive(Clone, Debug, Default)]
pub struct GridIndex {
    cells: AHashSet<Cell>,
    occupancy: AHashMap<Cell, PieceId>,
    owned: AHashMap<PieceId, Footprint>,
}

impl GridIndex {
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            occupancy: AHashMap::new(),
            owned: AHashMap::new(),
        }
    }

    pub fn is_valid_cell(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn occupant(&self, cell: Cell) -> Option<PieceId> {
        self.occupancy.get(&cell).copied()
    }

    /// Valid and either empty or already owned by `piece`
    pub fn is_free_for(&self, cell: Cell, piece: PieceId) -> bool {
        self.is_valid_cell(cell) && !matches!(self.occupant(cell), Some(owner) if owner != piece)
    }

    /// Check `place` preconditions without mutating anything
    pub fn check_placement(&self, piece: PieceId, footprint: &[Cell]) -> Result<(), EngineError> {
        for &cell in footprint {
            if !self.is_valid_cell(cell) {
                return Err(EngineError::InvalidCell { piece, cell });
            }
            if let Some(owner) = self.occupant(cell) {
                if owner != piece {
                    return Err(EngineError::CellOccupied { piece, owner, cell });
                }
            }
        }
        Ok(())
    }

    /// Record `piece` as the occupant of every footprint cell
    ///
    /// Re-placing a piece over cells it already owns is allowed. Any other
    /// conflict is an invariant violation and leaves the index untouched.
    pub fn place(&mut self, piece: PieceId, footprint: &[Cell]) -> Result<(), EngineError> {
        self.check_placement(piece, footprint)?;

        let owned = self.owned.entry(piece).or_default();
        for &cell in footprint {
            if self.occupancy.insert(cell, piece).is_none() {
                owned.push(cell);
            }
        }
        Ok(())
    }

    /// Remove every occupancy entry owned by `piece`, returning how many
    pub fn vacate(&mut self, piece: PieceId) -> usize {
        let Some(cells) = self.owned.remove(&piece) else {
            return 0;
        };
        for cell in &cells {
            self.occupancy.remove(cell);
        }
        cells.len()
    }

    /// Cells owned by `piece`, in placement order
    pub fn cells_of(&self, piece: PieceId) -> &[Cell] {
        match self.owned.get(&piece) {
            Some(cells) => cells.as_slice(),
            None => &[],
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupancy.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Cell, PieceId)> + '_ {
        self.occupancy.iter().map(|(cell, piece)| (*cell, *piece))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_by_three() -> GridIndex {
        GridIndex::new((0..3).flat_map(|r| (0..3).map(move |c| Cell::new(r, c))))
    }

    #[test]
    fn test_valid_cells() {
        let grid = GridIndex::new([Cell::new(0, 0), Cell::new(0, 1)]);
        assert!(grid.is_valid_cell(Cell::new(0, 1)));
        assert!(!grid.is_valid_cell(Cell::new(1, 0)));
        assert_eq!(grid.cell_count(), 2);
    }

    #[test]
    fn test_place_and_occupant() {
        let mut grid = three_by_three();
        let a = PieceId(0);
        grid.place(a, &[Cell::new(1, 1), Cell::new(1, 2)]).unwrap();

        assert_eq!(grid.occupant(Cell::new(1, 1)), Some(a));
        assert_eq!(grid.occupant(Cell::new(1, 2)), Some(a));
        assert_eq!(grid.occupant(Cell::new(0, 0)), None);
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn test_place_is_idempotent_for_owner() {
        let mut grid = three_by_three();
        let a = PieceId(0);
        grid.place(a, &[Cell::new(0, 0)]).unwrap();
        grid.place(a, &[Cell::new(0, 0)]).unwrap();

        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(grid.cells_of(a), &[Cell::new(0, 0)]);
    }

    #[test]
    fn test_place_rejects_conflicts_atomically() {
        let mut grid = three_by_three();
        grid.place(PieceId(0), &[Cell::new(0, 1)]).unwrap();

        let err = grid
            .place(PieceId(1), &[Cell::new(0, 0), Cell::new(0, 1)])
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::CellOccupied {
                piece: PieceId(1),
                owner: PieceId(0),
                cell: Cell::new(0, 1),
            }
        );
        // Nothing from the failed placement was recorded
        assert_eq!(grid.occupant(Cell::new(0, 0)), None);

        let err = grid.place(PieceId(1), &[Cell::new(5, 5)]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidCell { .. }));
    }

    #[test]
    fn test_vacate_removes_only_owner() {
        let mut grid = three_by_three();
        grid.place(PieceId(0), &[Cell::new(0, 0), Cell::new(1, 0)])
            .unwrap();
        grid.place(PieceId(1), &[Cell::new(2, 2)]).unwrap();

        assert_eq!(grid.vacate(PieceId(0)), 2);
        assert_eq!(grid.occupant(Cell::new(0, 0)), None);
        assert_eq!(grid.occupant(Cell::new(2, 2)), Some(PieceId(1)));
        assert_eq!(grid.vacate(PieceId(0)), 0);
    }

    #[test]
    fn test_is_free_for() {
        let mut grid = three_by_three();
        grid.place(PieceId(0), &[Cell::new(1, 1)]).unwrap();

        assert!(grid.is_free_for(Cell::new(1, 1), PieceId(0)));
        assert!(!grid.is_free_for(Cell::new(1, 1), PieceId(1)));
        assert!(grid.is_free_for(Cell::new(2, 2), PieceId(1)));
        assert!(!grid.is_free_for(Cell::new(3, 0), PieceId(1)));
    }
}
