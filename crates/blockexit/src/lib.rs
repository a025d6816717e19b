//! # Block Exit
//!
//! Sliding-block puzzle where colored pieces leave the board through
//! matching exits. This crate holds the command-line tooling around the
//! board engine: configuration, level checking and move replay.

pub mod config;
pub mod replay;

pub use blockexit_core::{board, grid, levels};

pub use config::AppConfig;
