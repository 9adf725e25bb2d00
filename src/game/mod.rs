//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end only reads [`GameState`] snapshots and feeds [`Intent`]s back.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Intent};
pub use config::{GameConfig, SpeedTier};
pub use engine::{GameEngine, TickResult};
pub use state::{GameOverReason, GameState, Lifecycle, Position, Snake};
