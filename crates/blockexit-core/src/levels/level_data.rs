//! Level file schema
//!
//! Field names follow the level files exactly (`MoveLimit`, `CellInfo`, ...).
//! Integers are kept signed here so that out-of-range values surface as
//! validation errors instead of opaque parse failures.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::LevelError;

/// Raw level definition as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LevelData {
    /// Maximum number of moves (0 = unlimited)
    #[serde(default)]
    pub move_limit: u32,
    pub row_count: i32,
    pub col_count: i32,
    pub cell_info: Vec<CellInfo>,
    pub movable_info: Vec<MovableInfo>,
    #[serde(default)]
    pub exit_info: Vec<ExitInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CellInfo {
    pub row: i32,
    pub col: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovableInfo {
    pub row: i32,
    pub col: i32,
    /// Allowed direction codes (0=Up, 1=Right, 2=Down, 3=Left)
    pub direction: Vec<i32>,
    pub length: i32,
    pub colors: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExitInfo {
    pub row: i32,
    pub col: i32,
    /// Direction code a piece must travel to leave here
    pub direction: i32,
    pub colors: i32,
}

impl LevelData {
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_ron_str(ron: &str) -> Result<Self, LevelError> {
        Ok(ron::from_str(ron)?)
    }

    /// Load from a `.json` or `.ron` file (by extension, JSON otherwise)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read level file: {}", path.display()))?;

        let is_ron = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ron"));
        let data = if is_ron {
            Self::from_ron_str(&content)
        } else {
            Self::from_json_str(&content)
        };

        data.with_context(|| format!("Failed to parse level file: {}", path.display()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize level to JSON")
    }
}
