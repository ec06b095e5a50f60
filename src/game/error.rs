use thiserror::Error;

/// Errors raised while advancing the simulation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Every cell of the board is covered by the snake
    #[error("no free cell for food on a {width}x{height} grid ({occupied} cells occupied)")]
    FoodPlacementExhausted {
        width: usize,
        height: usize,
        occupied: usize,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised when validating a game configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid {width}x{height} exceeds the supported coordinate range")]
    GridTooLarge { width: usize, height: usize },
    #[error("screen {screen_width}x{screen_height} cannot hold a cell of size {cell_size}")]
    ScreenSmallerThanCell {
        screen_width: u32,
        screen_height: u32,
        cell_size: u32,
    },
    #[error("tick rate must be non-zero")]
    ZeroTickRate,
}
