use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::{debug, info};

use super::{
    action::{Action, Direction},
    config::{GameConfig, InitialDirection},
    error::GameError,
    food::Food,
    grid::Grid,
    snake::Snake,
    state::{Phase, Snapshot},
};

/// Final numbers of an episode that ended in a self-collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeSummary {
    /// 1-based episode counter
    pub episode: u32,
    /// Body length at the moment of the collision
    pub length: usize,
    /// Food eaten during the episode
    pub score: u32,
    /// Steps taken during the episode
    pub steps: u32,
}

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether the head ran into the body this step
    pub self_collision: bool,
}

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// The engine was terminated and did not advance
    pub terminated: bool,
    /// Set when this step ended an episode; the board has already been reset
    pub episode_end: Option<EpisodeSummary>,
    /// How long the driver must wait before the next step
    pub cooldown: Option<Duration>,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn terminated() -> Self {
        Self {
            terminated: true,
            episode_end: None,
            cooldown: None,
            info: StepInfo::default(),
        }
    }
}

/// The simulation controller: owns the snake, the food and the RNG, and
/// advances them one step at a time
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Food,
    rng: Pcg64,
    phase: Phase,
    score: u32,
    steps: u32,
    episode: u32,
    total_steps: u64,
}

impl GameEngine {
    /// Create a new game engine with the given configuration and start the
    /// first episode
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let grid = config.grid()?;
        let mut rng = match config.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };
        let direction = pick_direction(config.initial_direction, &mut rng);
        let snake = Snake::new(grid.center(), direction);
        let food = Food::spawn(&grid, &snake, &mut rng)?;

        info!(
            width = grid.width(),
            height = grid.height(),
            seed = ?config.seed,
            ?direction,
            "game engine ready"
        );

        Ok(Self {
            config,
            grid,
            snake,
            food,
            rng,
            phase: Phase::Running,
            score: 0,
            steps: 0,
            episode: 1,
            total_steps: 0,
        })
    }

    /// Replace the board contents, keeping config and RNG. Used to set up
    /// specific positions.
    pub fn with_board(mut self, snake: Snake, food: Food) -> Self {
        self.snake = snake;
        self.food = food;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    /// Current cells for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            body: self.snake.body(),
            food: self.food.position(),
            score: self.score,
            episode: self.episode,
        }
    }

    /// Latch a direction for the next step. Reversals are dropped.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if self.is_terminated() {
            return false;
        }
        self.snake.request_direction(direction)
    }

    /// Forget a latched direction, e.g. one typed during the reset cooldown
    pub fn clear_pending_direction(&mut self) {
        self.snake.clear_pending_direction();
    }

    /// Execute one step of the game.
    ///
    /// A step either completes or fails as a whole: on error the board and
    /// counters are back where they were before the call.
    pub fn step(&mut self, action: Action) -> Result<StepResult, GameError> {
        if self.is_terminated() {
            return Ok(StepResult::terminated());
        }

        let checkpoint = self.checkpoint();
        let result = self.try_step(action);
        if result.is_err() {
            self.restore(checkpoint);
        }
        result
    }

    fn try_step(&mut self, action: Action) -> Result<StepResult, GameError> {
        if let Action::Move(direction) = action {
            self.snake.request_direction(direction);
        }
        self.snake.update_direction();
        self.snake.advance(&self.grid);
        self.steps += 1;
        self.total_steps += 1;

        let mut info = StepInfo::default();

        if self.food.is_consumed(self.snake.head()) {
            info.ate_food = true;
            self.snake.grow();
            self.food.relocate(&self.grid, &self.snake, &mut self.rng)?;
            self.score += 1;
            debug!(score = self.score, "food eaten");
        }

        let mut episode_end = None;
        let mut cooldown = None;

        if self.snake.detect_self_collision(self.config.collision_skip) {
            info.self_collision = true;
            let summary = EpisodeSummary {
                episode: self.episode,
                length: self.snake.len(),
                score: self.score,
                steps: self.steps,
            };
            info!(
                episode = summary.episode,
                length = summary.length,
                score = summary.score,
                steps = summary.steps,
                "snake bit itself, restarting episode"
            );

            self.phase = Phase::Resetting;
            let restarted = self.start_episode();
            self.phase = Phase::Running;
            restarted?;

            episode_end = Some(summary);
            cooldown = Some(self.config.reset_cooldown());
        }

        Ok(StepResult {
            terminated: false,
            episode_end,
            cooldown,
            info,
        })
    }

    /// Start a fresh episode on demand
    pub fn restart(&mut self) -> Result<(), GameError> {
        if self.is_terminated() {
            return Ok(());
        }
        self.start_episode()
    }

    /// Stop the simulation for good; later steps do nothing
    pub fn terminate(&mut self) {
        if !self.is_terminated() {
            info!(
                episodes = self.episode,
                total_steps = self.total_steps,
                "game terminated"
            );
        }
        self.phase = Phase::Terminated;
    }

    /// Food is placed against the fresh snake first, so a failure leaves the
    /// old episode intact
    fn start_episode(&mut self) -> Result<(), GameError> {
        let direction = pick_direction(self.config.initial_direction, &mut self.rng);
        let center = self.grid.center();
        self.food.relocate(&self.grid, &[center][..], &mut self.rng)?;
        self.snake.reset(center, direction);
        self.score = 0;
        self.steps = 0;
        self.episode += 1;
        Ok(())
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            snake: self.snake.clone(),
            food: self.food.clone(),
            score: self.score,
            steps: self.steps,
            episode: self.episode,
            total_steps: self.total_steps,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.snake = checkpoint.snake;
        self.food = checkpoint.food;
        self.score = checkpoint.score;
        self.steps = checkpoint.steps;
        self.episode = checkpoint.episode;
        self.total_steps = checkpoint.total_steps;
        self.phase = Phase::Running;
    }
}

/// Board and counters as they were before a step
struct Checkpoint {
    snake: Snake,
    food: Food,
    score: u32,
    steps: u32,
    episode: u32,
    total_steps: u64,
}

fn pick_direction(policy: InitialDirection, rng: &mut Pcg64) -> Direction {
    match policy {
        InitialDirection::Fixed(direction) => direction,
        InitialDirection::Random => Direction::random(rng),
    }
}
