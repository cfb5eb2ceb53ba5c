use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::state::Position;

/// Built-in game constants
///
/// The board is a square of `board_cells` cells on each side, derived from
/// a 400px canvas split into 20px grid squares. None of these
/// values are exposed to players; the only thing that varies during play is
/// the speed ramp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Canvas side length in pixels
    pub canvas_size: u32,
    /// Side length of one grid square in pixels
    pub grid_size: u32,

    /// Head position of a freshly reset snake
    pub start_head: Position,
    /// Heading of a freshly reset snake
    pub start_direction: Direction,
    /// Length of a freshly reset snake
    pub initial_snake_length: usize,

    /// Points awarded per food eaten
    pub food_points: u32,

    /// Tick interval at the start of a game, in milliseconds
    pub base_speed_ms: u64,
    /// The tick interval never drops to or below this floor via the ramp
    pub min_speed_ms: u64,
    /// How much the interval shrinks at each milestone
    pub speed_step_ms: u64,
    /// Score multiple at which the game speeds up
    pub speed_milestone: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_size: 400,
            grid_size: 20,
            start_head: Position::new(5, 5),
            start_direction: Direction::Right,
            initial_snake_length: 3,
            food_points: 10,
            base_speed_ms: 150,
            min_speed_ms: 50,
            speed_step_ms: 10,
            speed_milestone: 50,
        }
    }
}

impl GameConfig {
    /// Number of cells along each side of the board
    pub fn board_cells(&self) -> i32 {
        (self.canvas_size / self.grid_size) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_cells(), 20);
        assert_eq!(config.start_head, Position::new(5, 5));
        assert_eq!(config.start_direction, Direction::Right);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.base_speed_ms, 150);
    }

    #[test]
    fn test_speed_ramp_constants() {
        let config = GameConfig::default();
        assert_eq!(config.food_points, 10);
        assert_eq!(config.speed_milestone, 50);
        assert_eq!(config.speed_step_ms, 10);
        assert_eq!(config.min_speed_ms, 50);
        assert_eq!(config.speed_milestone % config.food_points, 0);
    }
}
