//! Snake Sim - a grid snake game
//!
//! This library provides:
//! - Core simulation: movement, collisions, food, speed ramp and the
//!   play/pause/game-over state machine (game module)
//! - Keyboard translation into game commands (input module)
//! - TUI rendering of game snapshots (render module)
//! - Per-session statistics (metrics module)
//! - The timer-driven terminal front end (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
