//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O, timers or
//! rendering. A driver calls [`GameEngine::tick`] at the interval reported by
//! [`GameEngine::schedule`] and hands [`GameSnapshot`]s to a renderer.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, TickResult, TickSchedule};
pub use state::{GameOverReason, GameSnapshot, GameState, Phase, Position, Snake};
