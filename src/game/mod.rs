//! Core game logic module for Snake
//!
//! This module contains all the game logic without any terminal or rendering
//! dependencies. The session drives it through an abstract scheduler and
//! store, so everything here can be exercised by calling `tick()` directly.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod session;
pub mod speed;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, StepResult};
pub use grid::{ConfigError, Grid};
pub use session::{Control, GameSession, RunState, Status};
pub use speed::SpeedSettings;
pub use state::{GameOverReason, GameState, Position, Snake};
