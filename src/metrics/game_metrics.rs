use std::time::{Duration, Instant};

use crate::game::EpisodeSummary;

/// In-memory counters for one play session
pub struct GameMetrics {
    pub episode_start: Instant,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub best_length: usize,
    pub episodes_finished: u32,
    pub total_score: u64,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            episode_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            best_length: 1,
            episodes_finished: 0,
            total_score: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.episode_start.elapsed();
    }

    pub fn on_episode_start(&mut self) {
        self.episode_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_episode_end(&mut self, summary: EpisodeSummary) {
        self.episodes_finished += 1;
        self.total_score += u64::from(summary.score);
        self.best_score = self.best_score.max(summary.score);
        self.best_length = self.best_length.max(summary.length);
        self.on_episode_start();
    }

    /// Average food per finished episode
    pub fn mean_score(&self) -> f64 {
        if self.episodes_finished == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.episodes_finished as f64
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
