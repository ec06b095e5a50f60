use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::error::ConfigError;
use super::grid::Grid;

/// Body cells right behind the head that the self-collision check ignores
pub const DEFAULT_COLLISION_SKIP: usize = 4;

/// Steps per second driven by the tick loop
pub const DEFAULT_TICK_RATE: u32 = 20;

/// Pause after an episode ends before the next step
pub const DEFAULT_RESET_COOLDOWN_MS: u64 = 1000;

pub const DEFAULT_SCREEN_WIDTH: u32 = 640;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 480;
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// How the snake picks its heading at the start of each episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialDirection {
    Fixed(Direction),
    Random,
}

impl Default for InitialDirection {
    fn default() -> Self {
        InitialDirection::Fixed(Direction::Right)
    }
}

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Leading body cells excluded from the self-collision check
    pub collision_skip: usize,
    /// Heading policy applied on every episode start
    pub initial_direction: InitialDirection,
    /// Cooldown after a self-collision, in milliseconds
    pub reset_cooldown_ms: u64,
    /// Simulation steps per second
    pub tick_rate: u32,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: (DEFAULT_SCREEN_WIDTH / DEFAULT_CELL_SIZE) as usize,
            grid_height: (DEFAULT_SCREEN_HEIGHT / DEFAULT_CELL_SIZE) as usize,
            collision_skip: DEFAULT_COLLISION_SKIP,
            initial_direction: InitialDirection::default(),
            reset_cooldown_ms: DEFAULT_RESET_COOLDOWN_MS,
            tick_rate: DEFAULT_TICK_RATE,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Size the grid from a screen in pixels and a square cell size
    pub fn from_screen(
        screen_width: u32,
        screen_height: u32,
        cell_size: u32,
    ) -> Result<Self, ConfigError> {
        let grid = Grid::from_screen(screen_width, screen_height, cell_size)?;
        Ok(Self::new(grid.width(), grid.height()))
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(64, 48)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.grid_width, self.grid_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid()?;
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }

    pub fn reset_cooldown(&self) -> Duration {
        Duration::from_millis(self.reset_cooldown_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 32);
        assert_eq!(config.grid_height, 24);
        assert_eq!(config.collision_skip, 4);
        assert_eq!(
            config.initial_direction,
            InitialDirection::Fixed(Direction::Right)
        );
        assert_eq!(config.reset_cooldown(), Duration::from_secs(1));
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
    }

    #[test]
    fn test_from_screen() {
        let config = GameConfig::from_screen(400, 300, 10).unwrap();
        assert_eq!((config.grid_width, config.grid_height), (40, 30));
        assert!(GameConfig::from_screen(5, 300, 10).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(
            GameConfig::new(0, 5).validate(),
            Err(ConfigError::EmptyGrid {
                width: 0,
                height: 5
            })
        );

        let mut config = GameConfig::default();
        config.tick_rate = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));
    }
}
