//! Puzzle engine - request, commit and retire
//!
//! Each piece follows `Idle -> Moving -> (Idle | Retired)`:
//! - `request_move` resolves a move and marks the piece as moving
//! - `commit` applies the resolved move, counts it and retires the piece if
//!   it now satisfies an exit
//! - `abort` drops the pending move without touching the board
//!
//! At most one move is pending at a time. The occupancy index is only
//! mutated inside `commit`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::events::PuzzleEvents;
use super::exits::ExitRegistry;
use super::grid_index::GridIndex;
use super::move_resolver::{MoveResolver, Resolution};
use super::piece::Piece;
use crate::error::{EngineError, MoveError, MoveRejection, RejectReason};
use crate::grid::{Cell, Direction, ExitId, PieceId};

/// Result of a committed move
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitOutcome {
    pub piece: PieceId,
    pub direction: Direction,
    pub anchor: Cell,
    pub steps: u32,
    /// Move count including this move
    pub move_count: u32,
    /// Exit the piece left through, if it was retired
    pub retired: Option<ExitId>,
    /// True only for the commit that emptied the board
    pub level_complete: bool,
}

/// A move that can currently be requested
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMove {
    pub piece: PieceId,
    pub direction: Direction,
    pub max_steps: u32,
}

/// Owns the board of one level and applies moves to it
#[derive(Clone, Debug)]
pub struct PuzzleEngine {
    grid: GridIndex,
    exits: ExitRegistry,
    /// Pieces still on the board, ordered by ID for deterministic iteration
    pieces: BTreeMap<PieceId, Piece>,
    pending: Option<Resolution>,
    move_count: u32,
    completed: bool,
}

impl PuzzleEngine {
    /// Build an engine and place every piece on the grid
    pub fn new(
        mut grid: GridIndex,
        exits: ExitRegistry,
        pieces: impl IntoIterator<Item = Piece>,
    ) -> Result<Self, EngineError> {
        let mut by_id = BTreeMap::new();
        for piece in pieces {
            grid.place(piece.id(), &piece.footprint())?;
            by_id.insert(piece.id(), piece);
        }

        Ok(Self {
            grid,
            exits,
            pieces: by_id,
            pending: None,
            move_count: 0,
            completed: false,
        })
    }

    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    pub fn exits(&self) -> &ExitRegistry {
        &self.exits
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    pub fn remaining_pieces(&self) -> usize {
        self.pieces.len()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn pending(&self) -> Option<&Resolution> {
        self.pending.as_ref()
    }

    /// Piece whose move is awaiting commit
    pub fn moving_piece(&self) -> Option<PieceId> {
        self.pending.as_ref().map(|p| p.piece)
    }

    /// Slide distance for `piece` in `direction` (0 for unknown pieces)
    pub fn max_steps(&self, piece: PieceId, direction: Direction) -> u32 {
        self.pieces
            .get(&piece)
            .map_or(0, |p| MoveResolver::max_steps(&self.grid, p, direction))
    }

    /// Every move that `request_move` would accept right now
    ///
    /// Empty while a move is pending, since every request is rejected
    /// until it is committed or aborted.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        if self.pending.is_some() || self.completed {
            return Vec::new();
        }
        self.pieces
            .values()
            .flat_map(|p| {
                p.allowed().directions().filter_map(move |direction| {
                    let max_steps = MoveResolver::max_steps(&self.grid, p, direction);
                    (max_steps > 0).then_some(LegalMove {
                        piece: p.id(),
                        direction,
                        max_steps,
                    })
                })
            })
            .collect()
    }

    /// Accept a move request and mark the piece as moving
    ///
    /// `steps` of `None` slides as far as possible. Rejections leave the
    /// engine untouched and are reported to `events` as well as returned.
    pub fn request_move(
        &mut self,
        piece: PieceId,
        direction: Direction,
        steps: Option<u32>,
        events: &mut dyn PuzzleEvents,
    ) -> Result<Resolution, MoveRejection> {
        let resolution = match self.try_resolve(piece, direction, steps) {
            Ok(resolution) => resolution,
            Err(reason) => {
                log::warn!("Rejected move {} of {}: {}", direction, piece, reason);
                events.on_move_rejected(piece, direction, &reason);
                return Err(MoveRejection {
                    piece,
                    direction,
                    reason,
                });
            }
        };

        if let Some(p) = self.pieces.get_mut(&piece) {
            p.set_moving(true);
        }
        log::debug!(
            "{} moving {} by {} (max {}) to {}",
            piece,
            direction,
            resolution.steps,
            resolution.max_steps,
            resolution.anchor
        );
        self.pending = Some(resolution.clone());
        Ok(resolution)
    }

    fn try_resolve(
        &self,
        piece: PieceId,
        direction: Direction,
        steps: Option<u32>,
    ) -> Result<Resolution, RejectReason> {
        if self.completed {
            return Err(RejectReason::LevelComplete);
        }
        let p = self.pieces.get(&piece).ok_or(RejectReason::UnknownPiece)?;
        if p.is_moving() {
            return Err(RejectReason::AlreadyMoving);
        }
        if let Some(other) = self.moving_piece() {
            return Err(RejectReason::AnotherPieceMoving(other));
        }
        MoveResolver::resolve(&self.grid, p, direction, steps)
    }

    /// Drop the pending move; the piece returns to idle where it was
    pub fn abort(&mut self) -> Option<Resolution> {
        let resolution = self.pending.take()?;
        if let Some(p) = self.pieces.get_mut(&resolution.piece) {
            p.set_moving(false);
        }
        log::debug!("Aborted move of {}", resolution.piece);
        Some(resolution)
    }

    /// Apply the pending move
    pub fn commit(&mut self, events: &mut dyn PuzzleEvents) -> Result<CommitOutcome, EngineError> {
        let resolution = self.pending.take().ok_or(EngineError::NoPendingMove)?;
        let id = resolution.piece;

        if !self.pieces.contains_key(&id) {
            log::error!("Pending move refers to missing {}", id);
            return Err(EngineError::MissingPiece { piece: id });
        }
        if let Err(e) = self.grid.check_placement(id, &resolution.footprint) {
            log::error!("Pending move of {} no longer fits: {}", id, e);
            return Err(e);
        }

        self.grid.vacate(id);
        self.grid.place(id, &resolution.footprint)?;
        let piece = self
            .pieces
            .get_mut(&id)
            .ok_or(EngineError::MissingPiece { piece: id })?;
        piece.commit_move(resolution.anchor, resolution.direction);
        self.move_count += 1;

        log::debug!(
            "Committed {} {} x{} -> {} (move {})",
            id,
            resolution.direction,
            resolution.steps,
            resolution.anchor,
            self.move_count
        );
        events.on_move_committed(id, resolution.anchor, resolution.steps);
        events.on_move_count(self.move_count);

        let retired = self.exits.matching_exit(piece);
        if let Some(exit) = retired {
            self.retire(id);
            log::info!("{} left through {}", id, exit);
            events.on_piece_retired(id, exit);
        }

        let level_complete = !self.completed && self.pieces.is_empty();
        if level_complete {
            self.completed = true;
            log::info!("Level complete after {} moves", self.move_count);
            events.on_level_complete();
        }

        Ok(CommitOutcome {
            piece: id,
            direction: resolution.direction,
            anchor: resolution.anchor,
            steps: resolution.steps,
            move_count: self.move_count,
            retired,
            level_complete,
        })
    }

    /// Request and immediately commit, for callers without animation
    pub fn play(
        &mut self,
        piece: PieceId,
        direction: Direction,
        steps: Option<u32>,
        events: &mut dyn PuzzleEvents,
    ) -> Result<CommitOutcome, MoveError> {
        self.request_move(piece, direction, steps, events)?;
        Ok(self.commit(events)?)
    }

    fn retire(&mut self, id: PieceId) {
        self.grid.vacate(id);
        self.pieces.remove(&id);
    }

    /// Verify that occupancy and piece footprints agree
    ///
    /// Every footprint cell must map back to its piece and every occupied
    /// cell must belong to a live piece covering it.
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        for piece in self.pieces.values() {
            for cell in piece.footprint() {
                let found = self.grid.occupant(cell);
                if found != Some(piece.id()) || !self.grid.is_valid_cell(cell) {
                    return Err(EngineError::OccupancyMismatch {
                        cell,
                        expected: piece.id(),
                        found,
                    });
                }
            }
        }

        for (cell, owner) in self.grid.occupied() {
            let covers = self
                .pieces
                .get(&owner)
                .is_some_and(|p| p.footprint().contains(&cell));
            if !covers {
                return Err(EngineError::OrphanedCell { cell, piece: owner });
            }
        }
        Ok(())
    }
}
