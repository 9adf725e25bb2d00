use super::{
    action::{Direction, Intent},
    config::GameConfig,
    state::{GameOverReason, GameState, Lifecycle, Position, Snake},
};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Random picks tried before falling back to listing every free cell
const FOOD_SPAWN_ATTEMPTS: usize = 32;

/// What a single tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the head landed on the food this tick
    pub ate_food: bool,
    /// Set when this tick ended the game
    pub game_over: Option<GameOverReason>,
}

/// The game engine: owns every piece of game state and is the only thing
/// that mutates it.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    state: GameState,
    /// Last accepted turn since the previous tick
    pending_direction: Option<Direction>,
}

impl GameEngine {
    /// Create a new game engine with the given configuration, idle on the start screen
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Same as [`GameEngine::new`] but with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Resume from an existing snapshot
    pub fn with_state(config: GameConfig, state: GameState, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            state,
            pending_direction: None,
        }
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let state = Self::fresh_state(&config, Lifecycle::Start, 0);
        Self {
            config,
            rng,
            state,
            pending_direction: None,
        }
    }

    fn fresh_state(config: &GameConfig, lifecycle: Lifecycle, high_score: u32) -> GameState {
        let snake = Snake::new(config.initial_head, Direction::Right);
        let mut state = GameState::new(
            snake,
            config.initial_food,
            config.grid_width,
            config.grid_height,
        );
        state.high_score = high_score;
        state.lifecycle = lifecycle;
        state
    }

    /// Read-only snapshot for rendering
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle
    }

    /// Direction the next tick will move in
    pub fn direction(&self) -> Direction {
        self.pending_direction.unwrap_or(self.state.snake.direction)
    }

    /// Interval the tick source should use for the current score
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval(self.state.score)
    }

    /// Route an intent to the matching operation
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Start => self.start(),
            Intent::PauseToggle => self.pause_toggle(),
            Intent::Reset => self.reset(),
            Intent::Turn(direction) => self.set_direction(direction),
        }
    }

    /// Fresh board and start ticking. Valid from any state.
    pub fn start(&mut self) {
        self.state = Self::fresh_state(&self.config, Lifecycle::Running, self.state.high_score);
        self.pending_direction = None;
        info!("game started (high score {})", self.state.high_score);
    }

    /// Fresh board, back to the idle start screen. Valid from any state.
    pub fn reset(&mut self) {
        self.state = Self::fresh_state(&self.config, Lifecycle::Start, self.state.high_score);
        self.pending_direction = None;
        info!("game reset");
    }

    /// Running <-> Paused. Ignored on the start and game-over screens.
    pub fn pause_toggle(&mut self) {
        self.state.lifecycle = match self.state.lifecycle {
            Lifecycle::Running => Lifecycle::Paused,
            Lifecycle::Paused => Lifecycle::Running,
            other => {
                trace!("pause toggle ignored in {:?}", other);
                return;
            }
        };
        info!("lifecycle now {:?}", self.state.lifecycle);
    }

    /// Queue a turn for the next tick.
    ///
    /// A turn straight back into the neck is dropped. Later calls before
    /// the next tick overwrite earlier ones.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.state.snake.direction.is_opposite(direction) {
            trace!(
                "rejected reversal {:?} while heading {:?}",
                direction, self.state.snake.direction
            );
            return;
        }
        self.pending_direction = Some(direction);
    }

    /// Advance the board by one cell. Does nothing unless running.
    pub fn tick(&mut self) -> TickResult {
        if self.state.lifecycle != Lifecycle::Running {
            return TickResult::default();
        }

        if let Some(direction) = self.pending_direction.take() {
            self.state.snake.direction = direction;
        }

        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.snake.direction);
        let ate_food = new_head == self.state.food;

        self.state.steps += 1;

        if let Some(reason) = self.check_collision(new_head, ate_food) {
            self.end_game(reason);
            return TickResult {
                ate_food: false,
                game_over: Some(reason),
            };
        }

        self.state.snake.advance(new_head, ate_food);

        if !ate_food {
            return TickResult::default();
        }

        let before = self.tick_interval();
        self.state.score += 1;
        if self.state.score > self.state.high_score {
            self.state.high_score = self.state.score;
        }
        if self.tick_interval() != before {
            debug!(
                "score {} moves tick interval to {:?}",
                self.state.score,
                self.tick_interval()
            );
        }

        match self.spawn_food() {
            Some(food) => {
                self.state.food = food;
                TickResult {
                    ate_food: true,
                    game_over: None,
                }
            }
            None => {
                self.end_game(GameOverReason::BoardFull);
                TickResult {
                    ate_food: true,
                    game_over: Some(GameOverReason::BoardFull),
                }
            }
        }
    }

    /// Check if the new head position ends the game
    fn check_collision(&self, pos: Position, growing: bool) -> Option<GameOverReason> {
        if !self.config.collisions {
            return None;
        }

        if !self.config.is_on_board(pos) {
            return Some(GameOverReason::Wall);
        }

        if self.state.snake.would_bite(pos, growing) {
            return Some(GameOverReason::SelfCollision);
        }

        None
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.state.lifecycle = Lifecycle::GameOver;
        self.state.game_over = Some(reason);
        self.pending_direction = None;
        info!(
            "game over after {} ticks: {:?}, score {}",
            self.state.steps, reason, self.state.score
        );
    }

    /// Pick a new food cell uniformly at random.
    ///
    /// Returns `None` only when food must avoid the snake and the snake
    /// covers the whole board.
    fn spawn_food(&mut self) -> Option<Position> {
        let width = self.config.grid_width as i32;
        let height = self.config.grid_height as i32;

        if !self.config.food_avoids_snake {
            let x = self.rng.gen_range(0..width);
            let y = self.rng.gen_range(0..height);
            return Some(Position::new(x, y));
        }

        // Cheap guesses first; only a crowded board pays for the full scan
        for _ in 0..FOOD_SPAWN_ATTEMPTS {
            let pos = Position::new(self.rng.gen_range(0..width), self.rng.gen_range(0..height));
            if !self.state.snake.contains(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .filter(|pos| !self.state.snake.contains(*pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}
