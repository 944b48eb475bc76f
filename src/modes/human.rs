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
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::game::{Action, GameConfig, GameEngine, GameState, InputLatch};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Redraw at roughly 30 FPS, independent of the game speed
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive play in the terminal
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    latch: InputLatch,
    paused: bool,
    should_quit: bool,
    /// Interval the tick timer is currently armed with
    tick_period: Duration,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();
        let tick_period = engine.tick_interval(&state);

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            latch: InputLatch::new(),
            paused: false,
            should_quit: false,
            tick_period,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        // Restore the terminal even when the loop failed
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games_played = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "session ended"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = paced_timer(self.tick_period);
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(anyhow::Error::new(err).context("Failed to read terminal event"));
                        }
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    if self.state.is_running() && !self.paused {
                        self.update_game();
                    }

                    // Score and effects change the pace between ticks
                    let period = self.engine.tick_interval(&self.state);
                    if period != self.tick_period {
                        debug!(?period, "tick interval changed");
                        self.tick_period = period;
                        tick_timer = paced_timer_after(period);
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics, self.paused);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::GameAction(Action::Move(direction)) => {
                if self.state.is_running() && !self.paused {
                    self.latch.submit(direction, self.state.snake.direction);
                }
            }
            KeyAction::GameAction(Action::Continue) | KeyAction::None => {}
            KeyAction::Pause => self.toggle_pause(),
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
        }
    }

    fn update_game(&mut self) {
        let action = Action::from(self.latch.take());
        let result = self.engine.step(&mut self.state, action);

        if result.terminated {
            self.metrics.on_game_over(self.state.score);
        }
    }

    fn toggle_pause(&mut self) {
        if !self.state.is_running() {
            return;
        }

        self.paused = !self.paused;
        if self.paused {
            self.metrics.on_pause();
        } else {
            self.metrics.on_resume();
        }
        debug!(paused = self.paused, "pause toggled");
    }

    fn reset_game(&mut self) {
        // Abandoning a game in progress still counts as having played it
        if self.state.is_running() && self.state.steps > 0 {
            self.metrics.on_game_over(self.state.score);
        }

        self.state = self.engine.reset();
        self.metrics.on_game_start();
        self.latch.clear();
        self.paused = false;
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

fn paced_timer(period: Duration) -> Interval {
    let mut timer = interval(period);
    // A stalled terminal should not make the snake sprint to catch up
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

fn paced_timer_after(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
