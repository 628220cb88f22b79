use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::grid::{ConfigError, Grid};
use super::speed::SpeedSettings;

/// Key under which the best score is stored
pub const DEFAULT_BEST_SCORE_KEY: &str = "snake_best";

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in pixels
    pub board_width: u32,
    /// Board height in pixels
    pub board_height: u32,
    /// Side of one square cell in pixels
    pub cell_size: u32,
    /// Score-to-interval parameters
    pub speed: SpeedSettings,
    /// Store key for the best score
    pub best_score_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 400,
            board_height: 400,
            cell_size: 20,
            speed: SpeedSettings::default(),
            best_score_key: DEFAULT_BEST_SCORE_KEY.to_string(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size in pixels
    pub fn new(board_width: u32, board_height: u32) -> Self {
        Self {
            board_width,
            board_height,
            ..Default::default()
        }
    }

    /// Create a small 10x10 board for testing
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json).with_context(|| format!("Failed to parse config {:?}", path))
    }

    /// Check every startup precondition and build the grid
    pub fn validate(&self) -> Result<Grid, ConfigError> {
        self.speed.validate()?;
        Grid::new(self.board_width, self.board_height, self.cell_size)
    }
}
