//! Replay execution against a level controller

use anyhow::{Context, Result};
use blockexit_core::board::EventLog;
use blockexit_core::levels::{Level, LevelController, LevelSet};
use blockexit_core::MoveError;

use super::command::MoveCommand;
use super::report::{MoveRecord, MoveResult, ReplayReport};
use super::script::Expectation;

/// Applies move commands to a single level and records the results
pub struct ReplayRunner {
    controller: LevelController,
    events: EventLog,
}

impl ReplayRunner {
    pub fn new(level: Level, enforce_move_limit: bool) -> Result<Self> {
        let name = level.name().to_string();
        let levels = LevelSet::new(vec![level])?;
        let controller = LevelController::new(levels, 0, enforce_move_limit)
            .with_context(|| format!("Failed to start level '{name}'"))?;
        Ok(Self {
            controller,
            events: EventLog::new(),
        })
    }

    /// Apply one command; rejections are recorded, invariant violations abort
    pub fn apply(&mut self, command: MoveCommand) -> Result<MoveRecord> {
        let result = match self.controller.play(
            command.piece_id(),
            command.direction,
            command.steps,
            &mut self.events,
        ) {
            Ok(outcome) => MoveResult::Committed {
                anchor: outcome.anchor,
                steps: outcome.steps,
                retired: outcome.retired,
            },
            Err(MoveError::Rejected(rejection)) => MoveResult::Rejected {
                reason: rejection.reason,
            },
            Err(MoveError::Engine(e)) => {
                log::error!("Engine error while applying {}: {}", command, e);
                return Err(e).with_context(|| format!("Move {command} corrupted the board"));
            }
        };
        Ok(MoveRecord { command, result })
    }

    /// Apply every command in order and build the report
    pub fn run(mut self, name: &str, moves: &[MoveCommand]) -> Result<ReplayReport> {
        let level = self.controller.current_level().name().to_string();
        log::info!("Replaying {} moves of '{}' on '{}'", moves.len(), name, level);

        let mut report = ReplayReport::new(name.to_string(), level);
        for &command in moves {
            let record = self.apply(command)?;
            log::debug!("{} -> {:?}", record.command, record.result);
            report.moves.push(record);
        }

        report.outcome = self.controller.outcome();
        report.move_count = self.controller.move_count();
        report.move_limit = self.controller.move_limit();
        report.remaining_pieces = self.controller.engine().remaining_pieces();
        report.events = std::mem::take(&mut self.events.events);
        Ok(report)
    }
}

/// Compare a report against an expectation, recording every mismatch
pub fn verify(report: &mut ReplayReport, expect: &Expectation) {
    if report.outcome != expect.outcome {
        report.fail(format!(
            "expected outcome {:?}, got {:?}",
            expect.outcome, report.outcome
        ));
    }
    if let Some(count) = expect.move_count {
        if report.move_count != count {
            report.fail(format!(
                "expected {} moves, got {}",
                count, report.move_count
            ));
        }
    }
    if let Some(pieces) = expect.remaining_pieces {
        if report.remaining_pieces != pieces {
            report.fail(format!(
                "expected {} pieces left, got {}",
                pieces, report.remaining_pieces
            ));
        }
    }
    if let Some(rejected) = expect.rejected {
        if report.rejected() != rejected {
            report.fail(format!(
                "expected {} rejected moves, got {}",
                rejected,
                report.rejected()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockexit_core::board::PuzzleEvent;
    use blockexit_core::grid::Direction;
    use blockexit_core::levels::{LevelOutcome, LevelRules};
    use blockexit_core::RejectReason;

    // Piece 0 exits right; piece 1 exits up once piece 0 is gone
    const LEVEL: &str = r#"{
        "MoveLimit": 3, "RowCount": 2, "ColCount": 3,
        "CellInfo": [
            {"Row":0,"Col":0},{"Row":0,"Col":1},{"Row":0,"Col":2},
            {"Row":1,"Col":0}
        ],
        "MovableInfo": [
            {"Row":0,"Col":0,"Direction":[1,3],"Length":1,"Colors":0},
            {"Row":1,"Col":0,"Direction":[0,2],"Length":1,"Colors":1}
        ],
        "ExitInfo": [
            {"Row":0,"Col":2,"Direction":1,"Colors":0},
            {"Row":0,"Col":0,"Direction":0,"Colors":1}
        ]
    }"#;

    fn runner() -> ReplayRunner {
        let level = Level::from_json_str("tiny", LEVEL, &LevelRules::default()).unwrap();
        ReplayRunner::new(level, true).unwrap()
    }

    #[test]
    fn test_solution_completes_level() {
        let moves = [
            MoveCommand::new(1, Direction::Up, None),
            MoveCommand::new(0, Direction::Right, None),
            MoveCommand::new(1, Direction::Up, None),
        ];
        let mut report = runner().run("solve", &moves).unwrap();

        assert_eq!(
            report.moves[0].result,
            MoveResult::Rejected {
                reason: RejectReason::Blocked
            }
        );
        assert_eq!(report.outcome, LevelOutcome::Complete);
        assert_eq!(report.move_count, 2);
        assert_eq!(report.remaining_pieces, 0);
        assert_eq!(
            report
                .events
                .iter()
                .filter(|e| matches!(e, PuzzleEvent::LevelComplete))
                .count(),
            1
        );

        verify(
            &mut report,
            &Expectation {
                outcome: LevelOutcome::Complete,
                move_count: Some(2),
                remaining_pieces: Some(0),
                rejected: Some(1),
            },
        );
        assert!(report.passed, "{:?}", report.failures);
    }

    #[test]
    fn test_verify_records_mismatches() {
        let moves = [MoveCommand::new(0, Direction::Right, Some(1))];
        let mut report = runner().run("partial", &moves).unwrap();

        verify(
            &mut report,
            &Expectation {
                outcome: LevelOutcome::Complete,
                move_count: Some(1),
                remaining_pieces: Some(0),
                rejected: None,
            },
        );
        assert!(!report.passed);
        assert_eq!(report.failures.len(), 2);
    }

    #[test]
    fn test_move_limit_stops_replay() {
        let moves = [
            MoveCommand::new(0, Direction::Right, Some(1)),
            MoveCommand::new(0, Direction::Left, None),
            MoveCommand::new(0, Direction::Right, Some(1)),
            MoveCommand::new(0, Direction::Right, None),
        ];
        let report = runner().run("wander", &moves).unwrap();

        assert_eq!(report.outcome, LevelOutcome::OutOfMoves);
        assert_eq!(report.move_count, 3);
        assert_eq!(report.rejected(), 1);
        assert_eq!(
            report.moves[3].result,
            MoveResult::Rejected {
                reason: RejectReason::OutOfMoves
            }
        );
    }
}
