//! Board state - occupancy, pieces, move resolution and exits

mod engine;
mod events;
mod exits;
mod grid_index;
mod move_resolver;
mod piece;

pub use engine::{CommitOutcome, LegalMove, PuzzleEngine};
pub use events::{EventLog, NoopEvents, PuzzleEvent, PuzzleEvents};
pub use exits::{Exit, ExitRegistry};
pub use grid_index::GridIndex;
pub use move_resolver::{MoveResolver, Resolution};
pub use piece::{Footprint, MAX_PIECE_LENGTH, Piece};
