//! Scripted move replay
//!
//! Replays a list of move commands against one level and compares the
//! final state to an expectation. Scripts are RON files such as:
//!
//! ```ron
//! (
//!     name: "Level 1 solution",
//!     level: "../levels/Level1.json",
//!     moves: [
//!         (piece: 0, direction: Down),
//!         (piece: 1, direction: Right, steps: Some(2)),
//!     ],
//!     expect: (outcome: Complete, move_count: Some(2)),
//! )
//! ```

mod command;
mod report;
mod runner;
mod script;

pub use command::{CommandError, MoveCommand, parse_moves};
pub use report::{MoveRecord, MoveResult, ReplayReport};
pub use runner::{ReplayRunner, verify};
pub use script::{Expectation, ReplayScript};
