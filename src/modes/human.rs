//! Interactive play in the terminal.
//!
//! One `select!` loop serialises everything that can touch the game: key
//! presses, ticks from the [`TickTimer`], render frames and Ctrl+C. Only one
//! branch runs at a time, so the engine is never mutated concurrently.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::ticker::TickTimer;
use crate::game::{GameConfig, GameEngine, Intent, Lifecycle};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    timer: TickTimer,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(GameEngine::new(config))
    }

    pub fn with_engine(engine: GameEngine) -> Self {
        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            timer: TickTimer::new(),
            should_quit: false,
        }
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

        // Release the tick source whichever way the loop ended
        self.timer.sync(false, self.engine.tick_interval());
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "session over: {} games, high score {}",
            self.metrics.games_played,
            self.engine.state().high_score
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, only armed while running
                _ = self.timer.tick() => {
                    self.on_tick();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let interval = self.engine.tick_interval();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.state(), &self.metrics, interval);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
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

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        let action = self.input_handler.handle_key_event(key);

        // Arrow keys are only listened to while the snake is moving
        if action.is_turn() && self.engine.lifecycle() != Lifecycle::Running {
            return;
        }

        match action {
            KeyAction::Game(intent) => self.dispatch(intent),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn dispatch(&mut self, intent: Intent) {
        let before = self.engine.lifecycle();
        self.engine.apply(intent);
        let after = self.engine.lifecycle();

        match (intent, before, after) {
            (Intent::Start, _, _) => self.metrics.on_game_start(),
            (Intent::Reset, _, _) => self.metrics.on_reset(),
            (Intent::PauseToggle, Lifecycle::Running, Lifecycle::Paused) => {
                self.metrics.on_pause()
            }
            (Intent::PauseToggle, Lifecycle::Paused, Lifecycle::Running) => {
                self.metrics.on_resume()
            }
            _ => {}
        }

        self.sync_timer();
    }

    fn on_tick(&mut self) {
        let result = self.engine.tick();

        if let Some(reason) = result.game_over {
            debug!("tick ended the game: {:?}", reason);
            self.metrics.on_game_over();
        }

        self.sync_timer();
    }

    /// Match the tick source to the engine's lifecycle and current speed
    fn sync_timer(&mut self) {
        self.timer
            .sync(self.engine.state().is_running(), self.engine.tick_interval());
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameState, Position, Snake};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn seeded_mode() -> HumanMode {
        HumanMode::with_engine(GameEngine::with_seed(GameConfig::default(), 5))
    }

    #[test]
    fn test_game_initialization() {
        let mode = seeded_mode();
        assert_eq!(mode.engine.lifecycle(), Lifecycle::Start);
        assert_eq!(mode.engine.state().score, 0);
        assert!(!mode.timer.is_armed());
    }

    #[test]
    fn test_unseeded_mode_starts_idle() {
        let mode = HumanMode::new(GameConfig::default());
        assert_eq!(mode.engine.lifecycle(), Lifecycle::Start);
        assert_eq!(mode.engine.state().snake.body, vec![Position::new(0, 0)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_arms_timer() {
        let mut mode = seeded_mode();

        mode.handle_event(key(KeyCode::Enter));

        assert_eq!(mode.engine.lifecycle(), Lifecycle::Running);
        assert_eq!(mode.timer.period(), Some(Duration::from_millis(200)));
        assert!(mode.metrics.is_clock_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_releases_timer() {
        let mut mode = seeded_mode();
        mode.handle_event(key(KeyCode::Enter));

        mode.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(mode.engine.lifecycle(), Lifecycle::Paused);
        assert!(!mode.timer.is_armed());
        assert!(!mode.metrics.is_clock_running());

        mode.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(mode.engine.lifecycle(), Lifecycle::Running);
        assert!(mode.timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_releases_timer() {
        let mut mode = seeded_mode();
        mode.handle_event(key(KeyCode::Enter));

        mode.handle_event(key(KeyCode::Char('r')));

        assert_eq!(mode.engine.lifecycle(), Lifecycle::Start);
        assert!(!mode.timer.is_armed());
    }

    #[test]
    fn test_turns_ignored_unless_running() {
        let mut mode = seeded_mode();

        mode.handle_event(key(KeyCode::Down));

        assert_eq!(mode.engine.direction(), Direction::Right);
    }

    #[tokio::test(start_paused = true)]
    async fn test_turns_forwarded_while_running() {
        let mut mode = seeded_mode();
        mode.handle_event(key(KeyCode::Enter));

        mode.handle_event(key(KeyCode::Down));

        assert_eq!(mode.engine.direction(), Direction::Down);
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_up_rearms_timer() {
        let config = GameConfig::default();
        let snake = Snake::new(Position::new(2, 2), Direction::Right);
        let mut state = GameState::new(snake, Position::new(3, 2), 10, 10);
        state.lifecycle = Lifecycle::Running;
        state.score = 24;
        let mut mode = HumanMode::with_engine(GameEngine::with_state(config, state, 1));
        mode.sync_timer();
        assert_eq!(mode.timer.period(), Some(Duration::from_millis(200)));

        mode.timer.tick().await;
        mode.on_tick();

        assert_eq!(mode.engine.state().score, 25);
        assert_eq!(mode.timer.period(), Some(Duration::from_millis(170)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_releases_timer() {
        let snake = Snake::new(Position::new(9, 0), Direction::Right);
        let mut state = GameState::new(snake, Position::new(5, 5), 10, 10);
        state.lifecycle = Lifecycle::Running;
        let mut mode =
            HumanMode::with_engine(GameEngine::with_state(GameConfig::default(), state, 1));
        mode.sync_timer();

        mode.on_tick();

        assert_eq!(mode.engine.lifecycle(), Lifecycle::GameOver);
        assert!(!mode.timer.is_armed());
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = seeded_mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut mode = seeded_mode();
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;

        mode.handle_event(Event::Key(release));

        assert!(!mode.should_quit);
    }
}
