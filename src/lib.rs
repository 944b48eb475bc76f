//! Clean Snake - terminal Snake with transient food effects
//!
//! This library provides:
//! - Core game logic and the per-tick update (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
