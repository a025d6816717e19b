//! Validated level definitions

use anyhow::{Context, Result};
use std::path::Path;

use super::level_data::LevelData;
use crate::board::{Exit, ExitRegistry, GridIndex, Piece, PuzzleEngine};
use crate::error::{EngineError, LevelError};
use crate::grid::{Cell, ColorId, Direction, DirectionSet, PALETTE_SIZE, PieceId};

/// Rules applied while validating level data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRules {
    /// Colors must be in `0..palette_size`
    pub palette_size: u32,
}

impl Default for LevelRules {
    fn default() -> Self {
        Self {
            palette_size: PALETTE_SIZE,
        }
    }
}

/// A level that passed validation
///
/// Holds the pristine starting position; `start` builds a fresh engine
/// from it, so restarting never sees moves from an earlier attempt.
#[derive(Debug, Clone)]
pub struct Level {
    name: String,
    move_limit: u32,
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
    pieces: Vec<Piece>,
    exits: Vec<Exit>,
}

impl Level {
    /// Validate raw data
    ///
    /// Fails on the first problem found; no partial level is produced.
    pub fn from_data(
        name: impl Into<String>,
        data: &LevelData,
        rules: &LevelRules,
    ) -> Result<Self, LevelError> {
        let (rows, cols) = (data.row_count, data.col_count);
        if rows <= 0 || cols <= 0 {
            return Err(LevelError::EmptyGrid { rows, cols });
        }

        let mut cells = Vec::with_capacity(data.cell_info.len());
        for info in &data.cell_info {
            let cell = Cell::new(info.row, info.col);
            if !(0..rows).contains(&cell.row) || !(0..cols).contains(&cell.col) {
                return Err(LevelError::CellOutOfBounds { cell, rows, cols });
            }
            cells.push(cell);
        }
        cells.sort();
        let listed = cells.len();
        cells.dedup();
        if cells.len() != listed {
            log::warn!("Level lists {} duplicate cells", listed - cells.len());
        }

        if data.movable_info.is_empty() {
            return Err(LevelError::NoPieces);
        }

        let mut grid = GridIndex::new(cells.iter().copied());
        let mut pieces = Vec::with_capacity(data.movable_info.len());
        for (index, info) in data.movable_info.iter().enumerate() {
            let mut allowed = DirectionSet::empty();
            for &code in &info.direction {
                let direction = Direction::from_code(code)
                    .ok_or(LevelError::PieceDirection { index, code })?;
                allowed |= DirectionSet::of(direction);
            }
            let color = check_color(info.colors, rules).ok_or(LevelError::PieceColor {
                index,
                color: info.colors,
                palette_size: rules.palette_size,
            })?;

            let piece = Piece::new(
                PieceId(index as u32),
                Cell::new(info.row, info.col),
                info.length,
                color,
                allowed,
            )
            .map_err(|source| LevelError::PieceShape { index, source })?;

            for cell in piece.footprint() {
                if !grid.is_valid_cell(cell) {
                    return Err(LevelError::PieceOffGrid { index, cell });
                }
                if let Some(owner) = grid.occupant(cell) {
                    return Err(LevelError::PieceOverlap {
                        index,
                        other: owner.0 as usize,
                        cell,
                    });
                }
            }
            grid.place(piece.id(), &piece.footprint())?;
            pieces.push(piece);
        }

        let mut exits = Vec::with_capacity(data.exit_info.len());
        for (index, info) in data.exit_info.iter().enumerate() {
            let cell = Cell::new(info.row, info.col);
            if !grid.is_valid_cell(cell) {
                return Err(LevelError::ExitOffGrid { index, cell });
            }
            let direction = Direction::from_code(info.direction).ok_or(LevelError::ExitDirection {
                index,
                code: info.direction,
            })?;
            let color = check_color(info.colors, rules).ok_or(LevelError::ExitColor {
                index,
                color: info.colors,
                palette_size: rules.palette_size,
            })?;
            exits.push(Exit {
                cell,
                direction,
                color,
            });
        }

        for piece in &pieces {
            if !exits.iter().any(|e| e.color == piece.color()) {
                log::warn!(
                    "{} (color {}) has no exit of its color",
                    piece.id(),
                    piece.color()
                );
            }
        }

        Ok(Self {
            name: name.into(),
            move_limit: data.move_limit,
            rows,
            cols,
            cells,
            pieces,
            exits,
        })
    }

    pub fn from_json_str(
        name: impl Into<String>,
        json: &str,
        rules: &LevelRules,
    ) -> Result<Self, LevelError> {
        Self::from_data(name, &LevelData::from_json_str(json)?, rules)
    }

    /// Load and validate a level file; the file stem becomes the name
    pub fn from_file(path: impl AsRef<Path>, rules: &LevelRules) -> Result<Self> {
        let path = path.as_ref();
        let data = LevelData::from_file(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "level".to_string());
        let level = Self::from_data(name, &data, rules)
            .with_context(|| format!("Invalid level: {}", path.display()))?;
        log::info!(
            "Loaded level '{}' ({}x{}, {} pieces, {} exits, move limit {})",
            level.name,
            level.rows,
            level.cols,
            level.pieces.len(),
            level.exits.len(),
            level.move_limit
        );
        Ok(level)
    }

    /// Fresh engine at the starting position
    pub fn start(&self) -> Result<PuzzleEngine, EngineError> {
        PuzzleEngine::new(
            GridIndex::new(self.cells.iter().copied()),
            ExitRegistry::new(self.exits.iter().copied()),
            self.pieces.iter().cloned(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn move_limit(&self) -> u32 {
        self.move_limit
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn exits(&self) -> &[Exit] {
        &self.exits
    }
}

fn check_color(color: i32, rules: &LevelRules) -> Option<ColorId> {
    u32::try_from(color)
        .ok()
        .filter(|c| *c < rules.palette_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeError;
    use crate::levels::level_data::{CellInfo, ExitInfo, MovableInfo};

    fn full_cells(rows: i32, cols: i32) -> Vec<CellInfo> {
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| CellInfo { row, col }))
            .collect()
    }

    fn movable(row: i32, col: i32, direction: Vec<i32>, length: i32, colors: i32) -> MovableInfo {
        MovableInfo {
            row,
            col,
            direction,
            length,
            colors,
        }
    }

    fn base() -> LevelData {
        LevelData {
            move_limit: 5,
            row_count: 3,
            col_count: 3,
            cell_info: full_cells(3, 3),
            movable_info: vec![movable(0, 0, vec![2], 1, 0)],
            exit_info: vec![ExitInfo {
                row: 2,
                col: 0,
                direction: 2,
                colors: 0,
            }],
        }
    }

    fn validate(data: &LevelData) -> Result<Level, LevelError> {
        Level::from_data("test", data, &LevelRules::default())
    }

    #[test]
    fn test_valid_level() {
        let level = validate(&base()).unwrap();
        assert_eq!(level.name(), "test");
        assert_eq!(level.move_limit(), 5);
        assert_eq!(level.cells().len(), 9);
        assert_eq!(level.pieces()[0].allowed(), DirectionSet::DOWN);
        assert_eq!(level.exits()[0].direction, Direction::Down);

        let engine = level.start().unwrap();
        assert_eq!(engine.remaining_pieces(), 1);
        engine.check_invariants().unwrap();
    }

    #[test]
    fn test_duplicate_cells_are_tolerated() {
        let mut data = base();
        data.cell_info.push(CellInfo { row: 1, col: 1 });
        assert_eq!(validate(&data).unwrap().cells().len(), 9);
    }

    #[test]
    fn test_empty_grid() {
        let mut data = base();
        data.row_count = 0;
        assert!(matches!(
            validate(&data),
            Err(LevelError::EmptyGrid { rows: 0, cols: 3 })
        ));
    }

    #[test]
    fn test_cell_out_of_bounds() {
        let mut data = base();
        data.cell_info.push(CellInfo { row: 3, col: 0 });
        assert!(matches!(
            validate(&data),
            Err(LevelError::CellOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_no_pieces() {
        let mut data = base();
        data.movable_info.clear();
        assert!(matches!(validate(&data), Err(LevelError::NoPieces)));
    }

    #[test]
    fn test_bad_piece_direction_and_color() {
        let mut data = base();
        data.movable_info[0].direction = vec![2, 4];
        assert!(matches!(
            validate(&data),
            Err(LevelError::PieceDirection { index: 0, code: 4 })
        ));

        let mut data = base();
        data.movable_info[0].colors = 5;
        assert!(matches!(
            validate(&data),
            Err(LevelError::PieceColor { index: 0, color: 5, .. })
        ));

        let mut data = base();
        data.movable_info[0].colors = -1;
        assert!(matches!(
            validate(&data),
            Err(LevelError::PieceColor { .. })
        ));
    }

    #[test]
    fn test_palette_size_is_configurable() {
        let mut data = base();
        data.movable_info[0].colors = 7;
        data.exit_info[0].colors = 7;
        let rules = LevelRules { palette_size: 8 };
        assert!(Level::from_data("wide", &data, &rules).is_ok());
    }

    #[test]
    fn test_bad_piece_shape() {
        let mut data = base();
        data.movable_info[0] = movable(0, 0, vec![0, 1], 2, 0);
        assert!(matches!(
            validate(&data),
            Err(LevelError::PieceShape {
                index: 0,
                source: ShapeError::MixedAxis
            })
        ));

        let mut data = base();
        data.movable_info[0].direction.clear();
        assert!(matches!(
            validate(&data),
            Err(LevelError::PieceShape {
                source: ShapeError::NoDirections,
                ..
            })
        ));
    }

    #[test]
    fn test_piece_off_grid_and_overlap() {
        let mut data = base();
        data.cell_info.retain(|c| !(c.row == 1 && c.col == 0));
        data.movable_info[0] = movable(0, 0, vec![0, 2], 2, 0);
        assert!(matches!(
            validate(&data),
            Err(LevelError::PieceOffGrid {
                index: 0,
                cell: Cell { row: 1, col: 0 }
            })
        ));

        let mut data = base();
        data.movable_info = vec![
            movable(0, 0, vec![1, 3], 2, 0),
            movable(0, 1, vec![0, 2], 1, 0),
        ];
        assert!(matches!(
            validate(&data),
            Err(LevelError::PieceOverlap {
                index: 1,
                other: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_bad_exits() {
        let mut data = base();
        data.exit_info[0].row = 7;
        assert!(matches!(
            validate(&data),
            Err(LevelError::ExitOffGrid { index: 0, .. })
        ));

        let mut data = base();
        data.exit_info[0].direction = -1;
        assert!(matches!(
            validate(&data),
            Err(LevelError::ExitDirection { index: 0, code: -1 })
        ));

        let mut data = base();
        data.exit_info[0].colors = 9;
        assert!(matches!(
            validate(&data),
            Err(LevelError::ExitColor { index: 0, .. })
        ));
    }
}
