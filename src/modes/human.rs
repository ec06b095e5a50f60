use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::game::{Action, EpisodeSummary, GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Overlay, Renderer};

/// Render at ~30 FPS regardless of the simulation rate
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive play in the terminal
pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    paused: bool,
    /// While set, ticks are skipped until this instant
    cooldown: Option<(Instant, EpisodeSummary)>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let engine = GameEngine::new(config).context("Failed to start game engine")?;

        Ok(Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            paused: false,
            cooldown: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut render_timer = interval(RENDER_INTERVAL);

        info!(
            tick_ms = self.engine.config().tick_interval().as_millis() as u64,
            "human mode started"
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game(Instant::now())?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let overlay = self.overlay();
                    let grid = *self.engine.grid();
                    let snapshot = self.engine.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &grid, &snapshot, &self.metrics, overlay);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                self.engine.terminate();
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                // Latched by the snake until the next tick; reversals are dropped here
                KeyAction::GameAction(Action::Move(direction)) => {
                    if !self.paused {
                        self.engine.queue_direction(direction);
                    }
                }
                KeyAction::GameAction(Action::Continue) | KeyAction::None => {}
                KeyAction::Pause => {
                    self.paused = !self.paused;
                    debug!(paused = self.paused, "pause toggled");
                }
                KeyAction::Restart => {
                    self.reset_game()?;
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
            }
        }

        Ok(())
    }

    fn update_game(&mut self, now: Instant) -> Result<()> {
        if self.paused || self.engine.is_terminated() {
            return Ok(());
        }
        if let Some((resume_at, _)) = self.cooldown {
            if now < resume_at {
                return Ok(());
            }
            self.cooldown = None;
            // Keys pressed during the cooldown belong to the old episode
            self.engine.clear_pending_direction();
        }

        let result = self.engine.step(Action::Continue)?;

        if let Some(summary) = result.episode_end {
            self.metrics.on_episode_end(summary);
            let wait = result.cooldown.unwrap_or_default();
            self.cooldown = Some((now + wait, summary));
        }

        Ok(())
    }

    fn overlay(&self) -> Overlay {
        match self.cooldown {
            Some((_, summary)) => Overlay::EpisodeOver(summary),
            None if self.paused => Overlay::Paused,
            None => Overlay::None,
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.engine.restart()?;
        self.metrics.on_episode_start();
        self.cooldown = None;
        self.paused = false;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
