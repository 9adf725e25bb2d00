//! Game configuration: board size, starting layout and the speed schedule

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::state::Position;

/// Board width and height used when nothing else is configured
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Largest board side accepted; each cell takes two terminal columns
pub const MAX_GRID_SIZE: usize = 100;

/// Where the single-cell snake appears on start/reset
pub const DEFAULT_INITIAL_HEAD: Position = Position { x: 0, y: 0 };

/// Where the first food item appears on start/reset
pub const DEFAULT_INITIAL_FOOD: Position = Position { x: 5, y: 5 };

/// Tick interval below the first speed-up threshold
pub const DEFAULT_TICK_MS: u64 = 200;

/// One step of the speed schedule: from `min_score` on, tick every `interval_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedTier {
    pub min_score: u32,
    pub interval_ms: u64,
}

impl SpeedTier {
    pub const fn new(min_score: u32, interval_ms: u64) -> Self {
        Self {
            min_score,
            interval_ms,
        }
    }
}

/// Configuration for the game
///
/// Every field has a default, so a JSON file only needs to name the
/// values it changes:
///
/// ```rust
/// use grid_snake::game::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "collisions": false }"#).unwrap();
/// assert_eq!(config.grid_width, 10);
/// assert!(!config.collisions);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Head cell of the fresh snake
    pub initial_head: Position,
    /// First food cell of every game
    pub initial_food: Position,
    /// Speed schedule, ordered by ascending `min_score`, first tier at score 0
    pub speed_tiers: Vec<SpeedTier>,
    /// End the game when the head leaves the board or runs into the body.
    /// With this off the snake may wander off-grid and overlap itself.
    pub collisions: bool,
    /// Never respawn food on a cell the snake occupies
    pub food_avoids_snake: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
            initial_head: DEFAULT_INITIAL_HEAD,
            initial_food: DEFAULT_INITIAL_FOOD,
            speed_tiers: vec![
                SpeedTier::new(0, DEFAULT_TICK_MS),
                SpeedTier::new(25, 170),
                SpeedTier::new(50, 130),
            ],
            collisions: true,
            food_avoids_snake: true,
        }
    }
}

impl GameConfig {
    /// Configuration that keeps the snake alive no matter where it goes
    /// and lets food land anywhere on the board.
    pub fn permissive() -> Self {
        Self {
            collisions: false,
            food_avoids_snake: false,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Interval between ticks for the given score.
    ///
    /// Picks the highest tier whose threshold the score has reached.
    ///
    /// ```rust
    /// use grid_snake::game::GameConfig;
    /// use std::time::Duration;
    ///
    /// let config = GameConfig::default();
    /// assert_eq!(config.tick_interval(24), Duration::from_millis(200));
    /// assert_eq!(config.tick_interval(25), Duration::from_millis(170));
    /// assert_eq!(config.tick_interval(50), Duration::from_millis(130));
    /// ```
    pub fn tick_interval(&self, score: u32) -> Duration {
        let interval_ms = self
            .speed_tiers
            .iter()
            .rev()
            .find(|tier| score >= tier.min_score)
            .map_or(DEFAULT_TICK_MS, |tier| tier.interval_ms);
        Duration::from_millis(interval_ms)
    }

    pub fn is_on_board(&self, pos: Position) -> bool {
        pos.is_within(self.grid_width, self.grid_height)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            bail!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width,
                self.grid_height
            );
        }

        if self.grid_width > MAX_GRID_SIZE || self.grid_height > MAX_GRID_SIZE {
            bail!(
                "grid {}x{} is too large, each side must be at most {}",
                self.grid_width,
                self.grid_height,
                MAX_GRID_SIZE
            );
        }

        if !self.is_on_board(self.initial_head) {
            bail!(
                "initial_head ({}, {}) is outside the {}x{} grid",
                self.initial_head.x,
                self.initial_head.y,
                self.grid_width,
                self.grid_height
            );
        }

        if !self.is_on_board(self.initial_food) {
            bail!(
                "initial_food ({}, {}) is outside the {}x{} grid",
                self.initial_food.x,
                self.initial_food.y,
                self.grid_width,
                self.grid_height
            );
        }

        if self.initial_food == self.initial_head {
            bail!("initial_food cannot share a cell with initial_head");
        }

        let Some(first) = self.speed_tiers.first() else {
            bail!("speed_tiers must contain at least one tier");
        };

        if first.min_score != 0 {
            bail!(
                "first speed tier must start at score 0, got {}",
                first.min_score
            );
        }

        for pair in self.speed_tiers.windows(2) {
            if pair[1].min_score <= pair[0].min_score {
                bail!(
                    "speed tier thresholds must be strictly increasing ({} then {})",
                    pair[0].min_score,
                    pair[1].min_score
                );
            }
        }

        if let Some(tier) = self.speed_tiers.iter().find(|tier| tier.interval_ms == 0) {
            bail!(
                "speed tier at score {} has a zero interval",
                tier.min_score
            );
        }

        Ok(())
    }
}
