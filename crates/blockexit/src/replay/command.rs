//! Textual move commands
//!
//! A command is `<piece>:<direction>[<steps>]`, e.g. `0:D` slides piece 0
//! down as far as it goes and `1:R2` moves piece 1 two cells right.
//! Directions accept the single letters `U R D L` or full names.

use blockexit_core::grid::{Direction, ParseDirectionError, PieceId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One move to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCommand {
    /// Index of the piece in the level's movable list
    pub piece: u32,
    pub direction: Direction,
    /// Cells to travel; `None` slides until blocked
    #[serde(default)]
    pub steps: Option<u32>,
}

impl MoveCommand {
    pub fn new(piece: u32, direction: Direction, steps: Option<u32>) -> Self {
        Self {
            piece,
            direction,
            steps,
        }
    }

    pub fn piece_id(&self) -> PieceId {
        PieceId(self.piece)
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.piece, self.direction.letter())?;
        if let Some(steps) = self.steps {
            write!(f, "{steps}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("'{0}' is not of the form <piece>:<direction>[<steps>]")]
    Malformed(String),

    #[error("invalid piece index in '{0}'")]
    InvalidPiece(String),

    #[error(transparent)]
    Direction(#[from] ParseDirectionError),

    #[error("invalid step count in '{0}' (must be at least 1)")]
    InvalidSteps(String),
}

impl FromStr for MoveCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (piece, rest) = s
            .split_once(':')
            .ok_or_else(|| CommandError::Malformed(s.to_string()))?;

        let piece = piece
            .trim()
            .parse::<u32>()
            .map_err(|_| CommandError::InvalidPiece(s.to_string()))?;

        let rest = rest.trim();
        let split = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (direction, steps) = rest.split_at(split);
        if direction.is_empty() {
            return Err(CommandError::Malformed(s.to_string()));
        }
        let direction = direction.parse::<Direction>()?;

        let steps = if steps.is_empty() {
            None
        } else {
            match steps.parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                _ => return Err(CommandError::InvalidSteps(s.to_string())),
            }
        };

        Ok(Self {
            piece,
            direction,
            steps,
        })
    }
}

/// Parse a whitespace or comma separated list of commands
pub fn parse_moves(text: &str) -> Result<Vec<MoveCommand>, CommandError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_letter_and_steps() {
        assert_eq!(
            "0:D".parse::<MoveCommand>().unwrap(),
            MoveCommand::new(0, Direction::Down, None)
        );
        assert_eq!(
            "12:r3".parse::<MoveCommand>().unwrap(),
            MoveCommand::new(12, Direction::Right, Some(3))
        );
        assert_eq!(
            "2:left".parse::<MoveCommand>().unwrap(),
            MoveCommand::new(2, Direction::Left, None)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "0D".parse::<MoveCommand>(),
            Err(CommandError::Malformed(_))
        ));
        assert!(matches!(
            "x:D".parse::<MoveCommand>(),
            Err(CommandError::InvalidPiece(_))
        ));
        assert!(matches!(
            "0:Q".parse::<MoveCommand>(),
            Err(CommandError::Direction(_))
        ));
        assert!(matches!(
            "0:3".parse::<MoveCommand>(),
            Err(CommandError::Malformed(_))
        ));
        assert!(matches!(
            "0:U0".parse::<MoveCommand>(),
            Err(CommandError::InvalidSteps(_))
        ));
    }

    #[test]
    fn test_display_matches_input_form() {
        assert_eq!(MoveCommand::new(1, Direction::Right, Some(2)).to_string(), "1:R2");
        assert_eq!(MoveCommand::new(0, Direction::Up, None).to_string(), "0:U");
    }

    #[test]
    fn test_parse_moves_list() {
        let moves = parse_moves("0:D  1:R2,\n2:U").unwrap();
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[1], MoveCommand::new(1, Direction::Right, Some(2)));
        assert!(parse_moves("").unwrap().is_empty());
        assert!(parse_moves("0:D bogus").is_err());
    }
}
