//! Application configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `blockexit.ron` file (if exists)
//! 3. Environment variables prefixed with `BLOCKEXIT_`
//!
//! Example environment variable: `BLOCKEXIT_RULES__ENFORCE_MOVE_LIMIT=false`

use anyhow::{Context, Result};
use blockexit_core::grid::PALETTE_SIZE;
use blockexit_core::levels::LevelRules;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub levels: LevelsConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// Where levels come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelsConfig {
    /// Directory holding `Level1.json`, `Level2.json`, ...
    pub directory: PathBuf,
    /// Zero-based index of the first level to play
    pub start_index: usize,
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("levels"),
            start_index: 0,
        }
    }
}

/// Game rules applied on top of level data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Number of colors a level may use
    pub palette_size: u32,
    /// Reject moves once a level's move limit is used up
    pub enforce_move_limit: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            palette_size: PALETTE_SIZE,
            enforce_move_limit: true,
        }
    }
}

impl RulesConfig {
    pub fn level_rules(&self) -> LevelRules {
        LevelRules {
            palette_size: self.palette_size,
        }
    }
}

/// Debug/development settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DebugConfig {
    /// Enable verbose logging
    pub verbose_logging: bool,
}

impl AppConfig {
    /// Load configuration from `blockexit.ron` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from("blockexit")
    }

    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. RON file at `path` (if exists)
    /// 3. Environment variables prefixed with `BLOCKEXIT_` (highest priority)
    pub fn load_from(path: &str) -> Result<Self> {
        Self::load_layered(path, Self::environment())
    }

    /// `BLOCKEXIT_<SECTION>__<KEY>` maps to `<section>.<key>`
    fn environment() -> Environment {
        Environment::with_prefix("BLOCKEXIT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_layered(path: &str, environment: Environment) -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("levels.directory", "levels")?
            .set_default("levels.start_index", 0_i64)?
            .set_default("rules.palette_size", i64::from(PALETTE_SIZE))?
            .set_default("rules.enforce_move_limit", true)?
            .set_default("debug.verbose_logging", false)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(path)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (BLOCKEXIT_LEVELS__DIRECTORY, etc.)
            .add_source(environment);

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
