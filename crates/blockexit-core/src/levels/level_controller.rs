//! Level progression and move-limit tracking

use serde::{Deserialize, Serialize};

use super::level::Level;
use super::level_set::LevelSet;
use crate::board::{CommitOutcome, PuzzleEngine, PuzzleEvents, Resolution};
use crate::error::{EngineError, MoveError, MoveRejection, RejectReason};
use crate::grid::{Direction, PieceId};

/// State of the current attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelOutcome {
    InProgress,
    Complete,
    /// Move limit reached before the board was cleared
    OutOfMoves,
}

/// Drives a set of levels: the current engine, move limit and progression
pub struct LevelController {
    levels: LevelSet,
    current: usize,
    engine: PuzzleEngine,
    outcome: LevelOutcome,
    /// Highest level index completed in this session
    highest_completed: Option<usize>,
    /// Reject moves once the limit is reached instead of only reporting it
    enforce_move_limit: bool,
}

impl LevelController {
    /// Start at `start_index`, wrapping indices past the end of the set
    pub fn new(
        levels: LevelSet,
        start_index: usize,
        enforce_move_limit: bool,
    ) -> Result<Self, EngineError> {
        let current = if start_index < levels.len() {
            start_index
        } else {
            log::warn!(
                "Start level {} out of range ({} levels), wrapping",
                start_index,
                levels.len()
            );
            start_index % levels.len()
        };

        let engine = Self::load(&levels, current)?;
        Ok(Self {
            levels,
            current,
            engine,
            outcome: LevelOutcome::InProgress,
            highest_completed: None,
            enforce_move_limit,
        })
    }

    fn load(levels: &LevelSet, index: usize) -> Result<PuzzleEngine, EngineError> {
        let level = levels.wrapped(index);
        log::info!("Starting level {} '{}'", index + 1, level.name());
        level.start()
    }

    pub fn engine(&self) -> &PuzzleEngine {
        &self.engine
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_level(&self) -> &Level {
        self.levels.wrapped(self.current)
    }

    pub fn outcome(&self) -> LevelOutcome {
        self.outcome
    }

    pub fn highest_completed(&self) -> Option<usize> {
        self.highest_completed
    }

    pub fn move_count(&self) -> u32 {
        self.engine.move_count()
    }

    /// Move limit of the current level (0 = unlimited)
    pub fn move_limit(&self) -> u32 {
        self.current_level().move_limit()
    }

    /// Moves left before the limit, `None` when unlimited
    pub fn moves_remaining(&self) -> Option<u32> {
        match self.move_limit() {
            0 => None,
            limit => Some(limit.saturating_sub(self.move_count())),
        }
    }

    pub fn request_move(
        &mut self,
        piece: PieceId,
        direction: Direction,
        steps: Option<u32>,
        events: &mut dyn PuzzleEvents,
    ) -> Result<Resolution, MoveRejection> {
        let blocked = match self.outcome {
            LevelOutcome::Complete => Some(RejectReason::LevelComplete),
            LevelOutcome::OutOfMoves if self.enforce_move_limit => Some(RejectReason::OutOfMoves),
            _ => None,
        };
        if let Some(reason) = blocked {
            log::warn!("Rejected move {} of {}: {}", direction, piece, reason);
            events.on_move_rejected(piece, direction, &reason);
            return Err(MoveRejection {
                piece,
                direction,
                reason,
            });
        }

        self.engine.request_move(piece, direction, steps, events)
    }

    pub fn abort(&mut self) -> Option<Resolution> {
        self.engine.abort()
    }

    /// Commit the pending move and update the attempt outcome
    ///
    /// Clearing the board wins over reaching the limit on the same move.
    pub fn commit(&mut self, events: &mut dyn PuzzleEvents) -> Result<CommitOutcome, EngineError> {
        let outcome = self.engine.commit(events)?;

        if outcome.level_complete {
            self.outcome = LevelOutcome::Complete;
            self.highest_completed = Some(
                self.highest_completed
                    .map_or(self.current, |h| h.max(self.current)),
            );
        } else if self.outcome == LevelOutcome::InProgress {
            let limit = self.move_limit();
            if limit > 0 && outcome.move_count >= limit {
                log::info!("Out of moves ({}/{})", outcome.move_count, limit);
                self.outcome = LevelOutcome::OutOfMoves;
            }
        }
        Ok(outcome)
    }

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

    /// Reset the current level to its starting position
    pub fn restart(&mut self) -> Result<(), EngineError> {
        self.engine = Self::load(&self.levels, self.current)?;
        self.outcome = LevelOutcome::InProgress;
        Ok(())
    }

    /// Move on to the next level, wrapping after the last; returns its index
    pub fn advance(&mut self) -> Result<usize, EngineError> {
        self.current = self.levels.next_index(self.current);
        self.restart()?;
        Ok(self.current)
    }
}
