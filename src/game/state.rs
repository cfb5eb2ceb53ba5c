use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// True when both positions share an edge
    pub fn is_adjacent(&self, other: Position) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction in effect for the next move
    pub direction: Direction,
}

impl Snake {
    /// Create a straight snake with the head first and the tail trailing
    /// behind it, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.opposite().delta();
        let body = std::iter::successors(Some(head), |prev| Some(prev.moved_by(dx, dy)))
            .take(length.max(1))
            .collect();

        Self { body, direction }
    }

    /// Create a snake from explicit segments, head first
    ///
    /// Used to set up scenarios such as a snake curled around itself.
    /// Returns `None` for an empty body, since a snake needs a head.
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Option<Self> {
        let snake = Self { body, direction };
        (!snake.is_empty()).then_some(snake)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if any segment, head included, occupies the position
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head in the current direction and return it.
    /// The tail stays put, so the snake is one segment longer.
    pub fn advance_head(&mut self) -> Position {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);
        new_head
    }

    /// Drop the last segment
    pub fn drop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop()
        } else {
            None
        }
    }

    /// Every segment touches the next one
    pub fn is_contiguous(&self) -> bool {
        self.body.windows(2).all(|pair| pair[0].is_adjacent(pair[1]))
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake has no segments at all
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Discrete state of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Start screen, waiting for the player
    NotStarted,
    /// Ticks are being scheduled
    Running,
    /// Ticks are suspended, progress kept
    Paused,
    /// Terminal; only a reset leaves it
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NotStarted => "Not started",
            Phase::Running => "Running",
            Phase::Paused => "Paused",
            Phase::GameOver => "Game over",
        }
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// No free cell was left to put food on
    BoardFilled,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Heading requested by input, applied on the next tick
    pub pending_direction: Option<Direction>,
    pub food: Position,
    pub board_cells: i32,
    pub score: u32,
    /// Current tick interval in milliseconds
    pub speed_ms: u64,
    pub phase: Phase,
    pub game_over_reason: Option<GameOverReason>,
}

impl GameState {
    /// Create a new game state on the start screen
    pub fn new(snake: Snake, food: Position, board_cells: i32, speed_ms: u64) -> Self {
        Self {
            snake,
            pending_direction: None,
            food,
            board_cells,
            score: 0,
            speed_ms,
            phase: Phase::NotStarted,
            game_over_reason: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        (0..self.board_cells).contains(&pos.x) && (0..self.board_cells).contains(&pos.y)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Current tick interval
    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    /// Read-only copy for renderers
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.body.clone(),
            food: self.food,
            score: self.score,
            phase: self.phase,
            speed_ms: self.speed_ms,
            direction: self.snake.direction,
            board_cells: self.board_cells,
            game_over_reason: self.game_over_reason,
        }
    }
}

/// What a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Snake segments, head first. After a wall collision the head lies
    /// outside the board.
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub phase: Phase,
    pub speed_ms: u64,
    pub direction: Direction,
    pub board_cells: i32,
    pub game_over_reason: Option<GameOverReason>,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
