//! Level data, validation and progression

mod level;
mod level_controller;
mod level_data;
mod level_set;

pub use level::{Level, LevelRules};
pub use level_controller::{LevelController, LevelOutcome};
pub use level_data::{CellInfo, ExitInfo, LevelData, MovableInfo};
pub use level_set::{LevelSet, level_path};
