//! Snake Grid - a single-player grid snake for the terminal
//!
//! This library provides:
//! - Core game logic and the game session (game module)
//! - Tick scheduling, wall-clock and manual (scheduler module)
//! - Best-score persistence (store module)
//! - Key mapping (input module)
//! - TUI rendering (render module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod scheduler;
pub mod store;
