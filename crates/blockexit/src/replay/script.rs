//! Replay script definition and RON file loading

use anyhow::{Context, Result};
use blockexit_core::levels::LevelOutcome;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::command::MoveCommand;
use super::report::ReplayReport;

/// Expected state after all moves were applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    pub outcome: LevelOutcome,

    /// Exact move count, if checked
    #[serde(default)]
    pub move_count: Option<u32>,

    /// Pieces left on the board, if checked
    #[serde(default)]
    pub remaining_pieces: Option<usize>,

    /// Number of rejected moves, if checked
    #[serde(default)]
    pub rejected: Option<usize>,
}

/// A level plus a move list, loaded from RON files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Script name
    pub name: String,

    /// Level file, absolute or relative to the script's directory
    pub level: PathBuf,

    /// Moves applied in order
    #[serde(default)]
    pub moves: Vec<MoveCommand>,

    pub expect: Expectation,
}

impl ReplayScript {
    /// Script that reproduces `report`, expecting exactly its final state
    pub fn recorded(level: PathBuf, moves: Vec<MoveCommand>, report: &ReplayReport) -> Self {
        Self {
            name: report.name.clone(),
            level,
            moves,
            expect: Expectation {
                outcome: report.outcome,
                move_count: Some(report.move_count),
                remaining_pieces: Some(report.remaining_pieces),
                rejected: Some(report.rejected()),
            },
        }
    }

    /// Load script from RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script: {}", path.display()))?;

        let script = ron::from_str(&content)
            .with_context(|| format!("Failed to parse RON replay script: {}", path.display()))?;

        Ok(script)
    }

    /// Save script to RON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize replay script to RON")?;

        std::fs::write(path.as_ref(), ron).with_context(|| {
            format!(
                "Failed to write replay script: {}",
                path.as_ref().display()
            )
        })?;

        Ok(())
    }

    /// Level path resolved against the directory of `script_path`
    pub fn level_path(&self, script_path: &Path) -> PathBuf {
        if self.level.is_absolute() {
            return self.level.clone();
        }
        script_path
            .parent()
            .map_or_else(|| self.level.clone(), |dir| dir.join(&self.level))
    }
}
