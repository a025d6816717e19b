//! Engine notifications for the presentation layer

use serde::{Deserialize, Serialize};

use crate::error::RejectReason;
use crate::grid::{Cell, Direction, ExitId, PieceId};

/// Receiver for engine notifications
///
/// Passed explicitly into every mutating engine call, so the engine never
/// reaches for a global listener.
pub trait PuzzleEvents {
    /// A move was applied to the board
    fn on_move_committed(&mut self, piece: PieceId, new_anchor: Cell, steps: u32);

    /// A piece left the board through an exit
    fn on_piece_retired(&mut self, piece: PieceId, exit: ExitId);

    /// The last piece left the board; fires once per level
    fn on_level_complete(&mut self);

    /// A move request was turned down with no state change
    fn on_move_rejected(&mut self, piece: PieceId, direction: Direction, reason: &RejectReason);

    /// Move count after a commit (for move-limit tracking)
    fn on_move_count(&mut self, _move_count: u32) {}
}

/// A no-op implementation for when nobody is listening
#[derive(Default)]
pub struct NoopEvents;

impl PuzzleEvents for NoopEvents {
    fn on_move_committed(&mut self, _piece: PieceId, _new_anchor: Cell, _steps: u32) {}
    fn on_piece_retired(&mut self, _piece: PieceId, _exit: ExitId) {}
    fn on_level_complete(&mut self) {}
    fn on_move_rejected(&mut self, _piece: PieceId, _direction: Direction, _reason: &RejectReason) {
    }
}

/// One recorded notification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleEvent {
    MoveCommitted {
        piece: PieceId,
        anchor: Cell,
        steps: u32,
    },
    PieceRetired {
        piece: PieceId,
        exit: ExitId,
    },
    LevelComplete,
    MoveRejected {
        piece: PieceId,
        direction: Direction,
        reason: RejectReason,
    },
    MoveCount(u32),
}

/// Records every notification in order
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<PuzzleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, predicate: impl Fn(&PuzzleEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }

    pub fn level_complete_count(&self) -> usize {
        self.count(|e| matches!(e, PuzzleEvent::LevelComplete))
    }
}

impl PuzzleEvents for EventLog {
    fn on_move_committed(&mut self, piece: PieceId, new_anchor: Cell, steps: u32) {
        self.events.push(PuzzleEvent::MoveCommitted {
            piece,
            anchor: new_anchor,
            steps,
        });
    }

    fn on_piece_retired(&mut self, piece: PieceId, exit: ExitId) {
        self.events.push(PuzzleEvent::PieceRetired { piece, exit });
    }

    fn on_level_complete(&mut self) {
        self.events.push(PuzzleEvent::LevelComplete);
    }

    fn on_move_rejected(&mut self, piece: PieceId, direction: Direction, reason: &RejectReason) {
        self.events.push(PuzzleEvent::MoveRejected {
            piece,
            direction,
            reason: reason.clone(),
        });
    }

    fn on_move_count(&mut self, move_count: u32) {
        self.events.push(PuzzleEvent::MoveCount(move_count));
    }
}
