use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use torus_snake::game::config::{
    DEFAULT_CELL_SIZE, DEFAULT_RESET_COOLDOWN_MS, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH,
};
use torus_snake::game::{GameConfig, InitialDirection, DEFAULT_COLLISION_SKIP, DEFAULT_TICK_RATE};
use torus_snake::modes::{HeadlessMode, HumanMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// How to drive the game
    #[arg(long, value_enum, default_value = "human")]
    mode: Mode,

    /// Grid width in cells (overrides --screen-width)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells (overrides --screen-height)
    #[arg(long)]
    height: Option<usize>,

    /// Screen width in pixels, divided by --cell-size
    #[arg(long, default_value_t = DEFAULT_SCREEN_WIDTH)]
    screen_width: u32,

    /// Screen height in pixels, divided by --cell-size
    #[arg(long, default_value_t = DEFAULT_SCREEN_HEIGHT)]
    screen_height: u32,

    /// Cell size in pixels
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    cell_size: u32,

    /// Simulation steps per second
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    tick_rate: u32,

    /// Body cells behind the head ignored by the self-collision check
    #[arg(long, default_value_t = DEFAULT_COLLISION_SKIP)]
    collision_skip: usize,

    /// Start each episode in a random direction instead of right
    #[arg(long)]
    random_direction: bool,

    /// Pause after the snake bites itself, in milliseconds
    #[arg(long, default_value_t = DEFAULT_RESET_COOLDOWN_MS)]
    cooldown_ms: u64,

    /// Seed for food placement and random directions
    #[arg(long)]
    seed: Option<u64>,

    /// Number of steps to run in headless mode
    #[arg(long, default_value = "10000")]
    steps: u64,

    /// Write logs to this file (the TUI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with the keyboard
    Human,
    /// Run a random policy without a terminal and print a summary
    Headless,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config =
            GameConfig::from_screen(self.screen_width, self.screen_height, self.cell_size)
                .context("Invalid screen size")?;
        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        config.tick_rate = self.tick_rate;
        config.collision_skip = self.collision_skip;
        config.reset_cooldown_ms = self.cooldown_ms;
        config.seed = self.seed;
        if self.random_direction {
            config.initial_direction = InitialDirection::Random;
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (&cli.log_file, &cli.mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, Mode::Headless) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // Logging to the terminal would corrupt the TUI
        (None, Mode::Human) => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Headless => {
            let report = HeadlessMode::new(config)?.run(cli.steps)?;
            println!(
                "steps: {}  episodes: {}  best score: {}  best length: {}  mean score: {:.2}",
                report.steps,
                report.episodes_finished,
                report.best_score,
                report.best_length,
                report.mean_score
            );
        }
    }

    Ok(())
}
