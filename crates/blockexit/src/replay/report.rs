//! Replay results and reporting

use anyhow::{Context, Result};
use blockexit_core::board::PuzzleEvent;
use blockexit_core::grid::{Cell, ExitId};
use blockexit_core::levels::LevelOutcome;
use blockexit_core::RejectReason;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::command::MoveCommand;

/// What happened to one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    Committed {
        anchor: Cell,
        steps: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        retired: Option<ExitId>,
    },
    Rejected {
        reason: RejectReason,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub command: MoveCommand,
    pub result: MoveResult,
}

/// Report from replaying a move list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Script name
    pub name: String,

    /// Level the moves were applied to
    pub level: String,

    /// Overall pass/fail status (true when no expectation was given)
    pub passed: bool,

    /// One entry per command, in order
    pub moves: Vec<MoveRecord>,

    pub outcome: LevelOutcome,

    pub move_count: u32,

    /// Move limit of the level (0 = unlimited)
    pub move_limit: u32,

    pub remaining_pieces: usize,

    /// Expectation failures (empty if all passed)
    pub failures: Vec<String>,

    /// Every engine notification, in order
    pub events: Vec<PuzzleEvent>,
}

impl ReplayReport {
    pub fn new(name: String, level: String) -> Self {
        Self {
            name,
            level,
            passed: true,
            moves: Vec::new(),
            outcome: LevelOutcome::InProgress,
            move_count: 0,
            move_limit: 0,
            remaining_pieces: 0,
            failures: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn committed(&self) -> usize {
        self.moves
            .iter()
            .filter(|m| matches!(m.result, MoveResult::Committed { .. }))
            .count()
    }

    pub fn rejected(&self) -> usize {
        self.moves.len() - self.committed()
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.passed = false;
        self.failures.push(message.into());
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        let limit = match self.move_limit {
            0 => String::from("unlimited"),
            n => n.to_string(),
        };
        format!(
            "{} on '{}': {:?} | Moves: {}/{} | Rejected: {} | Pieces left: {} | {}",
            self.name,
            self.level,
            self.outcome,
            self.move_count,
            limit,
            self.rejected(),
            self.remaining_pieces,
            if self.passed { "PASSED" } else { "FAILED" }
        )
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize replay report")
    }

    /// Save report as JSON
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write report: {}", path.as_ref().display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockexit_core::grid::Direction;

    fn report() -> ReplayReport {
        let mut report = ReplayReport::new("solve".to_string(), "Level1".to_string());
        report.moves.push(MoveRecord {
            command: MoveCommand::new(0, Direction::Down, None),
            result: MoveResult::Committed {
                anchor: Cell::new(2, 0),
                steps: 2,
                retired: None,
            },
        });
        report.moves.push(MoveRecord {
            command: MoveCommand::new(0, Direction::Left, None),
            result: MoveResult::Rejected {
                reason: RejectReason::DirectionNotAllowed(Direction::Left),
            },
        });
        report.move_count = 1;
        report.remaining_pieces = 1;
        report
    }

    #[test]
    fn test_counts_and_summary() {
        let mut report = report();
        assert_eq!(report.committed(), 1);
        assert_eq!(report.rejected(), 1);
        assert!(report.summary().contains("Moves: 1/unlimited"));
        assert!(report.summary().ends_with("PASSED"));

        report.fail("expected Complete, got InProgress");
        assert!(!report.passed);
        assert!(report.summary().ends_with("FAILED"));
    }

    #[test]
    fn test_save_report_as_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("report.json");
        report().save_to_file(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["name"], "solve");
        assert_eq!(value["moves"].as_array().unwrap().len(), 2);
    }
}
