//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it one tick at a time.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod latch;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::{ActiveEffect, Effect, Food, FoodKind};
pub use latch::InputLatch;
pub use state::{CollisionType, GameState, GameStatus, Position, Snake};
