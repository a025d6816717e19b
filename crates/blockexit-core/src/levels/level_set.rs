//! Ordered collections of levels

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::level::{Level, LevelRules};
use crate::error::LevelError;

/// Non-empty, ordered list of levels
#[derive(Debug, Clone)]
pub struct LevelSet {
    levels: Vec<Level>,
}

impl LevelSet {
    pub fn new(levels: Vec<Level>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::EmptyLevelSet);
        }
        Ok(Self { levels })
    }

    /// Load `Level1.json`, `Level2.json`, ... from `dir`
    ///
    /// Numbering is 1-based and contiguous: loading stops at the first
    /// missing index. A `.ron` file is used when no `.json` file exists for
    /// an index.
    pub fn from_dir(dir: impl AsRef<Path>, rules: &LevelRules) -> Result<Self> {
        let dir = dir.as_ref();
        let mut levels = Vec::new();

        for number in 1.. {
            let Some(path) = level_path(dir, number) else {
                break;
            };
            levels.push(Level::from_file(&path, rules)?);
        }

        log::info!("Found {} levels in {}", levels.len(), dir.display());
        Self::new(levels).with_context(|| format!("No levels found in {}", dir.display()))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// Level at `index` modulo the set size
    pub fn wrapped(&self, index: usize) -> &Level {
        &self.levels[index % self.levels.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }

    /// Index after `index`, wrapping to the first level
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.levels.len()
    }
}

/// Path of level `number` inside `dir`, if such a file exists
pub fn level_path(dir: &Path, number: usize) -> Option<PathBuf> {
    ["json", "ron"]
        .iter()
        .map(|ext| dir.join(format!("Level{number}.{ext}")))
        .find(|path| path.is_file())
}
