//! Core simulation for snake on a toroidal grid
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drivers feed it one [`Action`] per tick and draw the [`Snapshot`] it exposes.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{GameConfig, InitialDirection, DEFAULT_COLLISION_SKIP, DEFAULT_TICK_RATE};
pub use engine::{EpisodeSummary, GameEngine, StepInfo, StepResult};
pub use error::{ConfigError, GameError};
pub use food::Food;
pub use grid::{Grid, Position};
pub use snake::Snake;
pub use state::{Occupant, Phase, Snapshot};
