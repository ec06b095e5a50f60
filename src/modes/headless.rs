//! Drives the engine without a terminal, using a random turning policy.
//!
//! Useful for smoke runs in CI or over SSH sessions without a TTY. Cooldowns
//! are not slept: the whole run is as fast as the engine allows.

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tracing::info;

use crate::game::{Action, Direction, GameConfig, GameEngine};
use crate::metrics::GameMetrics;

/// Chance per tick that the policy asks for a turn
const TURN_PROBABILITY: f64 = 0.2;

/// Totals of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessReport {
    pub steps: u64,
    pub episodes_finished: u32,
    pub best_score: u32,
    pub best_length: usize,
    pub mean_score: f64,
}

pub struct HeadlessMode {
    engine: GameEngine,
    policy_rng: Pcg64,
    metrics: GameMetrics,
}

impl HeadlessMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let policy_rng = match config.seed {
            // Offset so policy and food draws are not the same stream
            Some(seed) => Pcg64::seed_from_u64(seed.wrapping_add(1)),
            None => Pcg64::from_entropy(),
        };
        let engine = GameEngine::new(config).context("Failed to start game engine")?;
        Ok(Self {
            engine,
            policy_rng,
            metrics: GameMetrics::new(),
        })
    }

    /// Advance the engine `steps` times
    pub fn run(&mut self, steps: u64) -> Result<HeadlessReport> {
        info!(steps, "headless run started");

        for _ in 0..steps {
            let action = self.next_action();
            let result = self
                .engine
                .step(action)
                .with_context(|| format!("Step {} failed", self.engine.total_steps() + 1))?;

            if let Some(summary) = result.episode_end {
                self.metrics.on_episode_end(summary);
            }
        }
        self.engine.terminate();

        let report = HeadlessReport {
            steps: self.engine.total_steps(),
            episodes_finished: self.metrics.episodes_finished,
            best_score: self.metrics.best_score.max(self.engine.score()),
            best_length: self.metrics.best_length.max(self.engine.snake().len()),
            mean_score: self.metrics.mean_score(),
        };
        info!(
            steps = report.steps,
            episodes = report.episodes_finished,
            best_score = report.best_score,
            best_length = report.best_length,
            mean_score = report.mean_score,
            "headless run finished"
        );
        Ok(report)
    }

    fn next_action(&mut self) -> Action {
        if self.policy_rng.gen_bool(TURN_PROBABILITY) {
            Action::Move(Direction::random(&mut self.policy_rng))
        } else {
            Action::Continue
        }
    }
}
