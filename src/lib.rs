//! Torus Snake - snake on a wrap-around grid, played in the terminal
//!
//! This library provides:
//! - Core simulation (game module), free of I/O
//! - Keyboard mapping and input latching (input module)
//! - TUI rendering (render module)
//! - Session counters (metrics module)
//! - Drivers that own the tick loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
