use super::{
    action::{Command, Direction},
    config::GameConfig,
    state::{GameOverReason, GameSnapshot, GameState, Phase, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Random draws before food placement falls back to scanning the board
const MAX_FOOD_ATTEMPTS: usize = 1024;

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether the tick interval shrank; the driver has to reschedule
    pub speed_changed: bool,
    /// Set when this tick ended the game
    pub game_over: Option<GameOverReason>,
}

/// How the driver should currently be ticking the engine
///
/// `revision` changes whenever an outstanding scheduled tick has become
/// stale, even if the interval itself is unchanged (reset then start at the
/// same speed, for instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    pub revision: u64,
    /// `None` while ticks must not fire
    pub interval: Option<Duration>,
}

/// The game engine that owns all game state and handles all game logic
///
/// Every command is a silent no-op when it is not valid in the current
/// phase; the `bool` returned by a command reports whether it was accepted.
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
    schedule_revision: u64,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food sequence is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let state = Self::fresh_state(&config);
        let mut engine = Self {
            config,
            state,
            rng,
            schedule_revision: 0,
        };
        engine.place_initial_food();
        engine
    }

    /// Create an engine around a prepared state
    ///
    /// Scenario setups (a snake at the wall, a snake curled onto itself) go
    /// through here. The state is taken as-is.
    pub fn from_state(config: GameConfig, state: GameState, seed: u64) -> Self {
        Self {
            config,
            state,
            rng: StdRng::seed_from_u64(seed),
            schedule_revision: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Read-only copy of the state for a renderer
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// The tick cadence the engine wants from its driver
    pub fn schedule(&self) -> TickSchedule {
        TickSchedule {
            revision: self.schedule_revision,
            interval: (self.state.phase == Phase::Running).then(|| self.state.speed()),
        }
    }

    /// Dispatch a command value
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => {
                self.reset();
                true
            }
            Command::SetDirection(direction) => self.set_direction(direction),
            Command::Tick => {
                let running = self.state.phase == Phase::Running;
                self.tick();
                running
            }
        }
    }

    /// Leave the start screen and begin play
    pub fn start(&mut self) -> bool {
        if self.state.phase != Phase::NotStarted {
            return false;
        }
        self.transition(Phase::Running);
        true
    }

    /// Suspend ticking; progress is kept
    pub fn pause(&mut self) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }
        self.transition(Phase::Paused);
        true
    }

    /// Continue a paused game at the current speed
    pub fn resume(&mut self) -> bool {
        if self.state.phase != Phase::Paused {
            return false;
        }
        self.transition(Phase::Running);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::NotStarted | Phase::GameOver => false,
        }
    }

    /// Reset the game to the start screen
    pub fn reset(&mut self) {
        self.state = Self::fresh_state(&self.config);
        self.place_initial_food();
        self.schedule_revision += 1;
        debug!(food = ?self.state.food, "game reset");
    }

    /// Reset and immediately start a new game
    pub fn restart(&mut self) -> bool {
        self.reset();
        self.start()
    }

    /// Buffer a heading change for the next tick
    ///
    /// A reversal is judged against the heading in effect, not against an
    /// earlier buffered request. Only accepted while running.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }
        if self.state.snake.direction.is_opposite(direction) {
            trace!(?direction, "reversal ignored");
            return false;
        }
        self.state.pending_direction = Some(direction);
        true
    }

    /// Advance the snake one cell and check for collisions
    pub fn tick(&mut self) -> TickResult {
        let mut result = TickResult::default();
        if self.state.phase != Phase::Running {
            return result;
        }

        if let Some(direction) = self.state.pending_direction.take() {
            self.state.snake.direction = direction;
        }

        let new_head = self.state.snake.advance_head();

        if new_head == self.state.food {
            result.ate_food = true;
            self.state.score += self.config.food_points;

            match self.generate_food() {
                Some(food) => self.state.food = food,
                None => {
                    self.end_game(GameOverReason::BoardFilled);
                    result.game_over = Some(GameOverReason::BoardFilled);
                    return result;
                }
            }

            result.speed_changed = self.ramp_speed();
        } else {
            self.state.snake.drop_tail();
        }

        if let Some(reason) = self.check_collision() {
            self.end_game(reason);
            result.game_over = Some(reason);
        }

        trace!(head = ?new_head, score = self.state.score, "tick");
        result
    }

    /// Pick a random free cell for food without placing it
    ///
    /// Coordinates are drawn from `0..board_cells - 1`, so the last row and
    /// column are never picked by the random draw. If the draw keeps landing
    /// on the snake the board is scanned instead. Returns `None` only when
    /// the snake covers every cell.
    pub fn generate_food(&mut self) -> Option<Position> {
        let sample_bound = self.state.board_cells - 1;

        if sample_bound > 0 {
            for _ in 0..MAX_FOOD_ATTEMPTS {
                let pos = Position::new(
                    self.rng.gen_range(0..sample_bound),
                    self.rng.gen_range(0..sample_bound),
                );
                if !self.state.is_occupied_by_snake(pos) {
                    return Some(pos);
                }
            }
        }

        warn!(
            length = self.state.snake.len(),
            "random food placement exhausted, scanning board"
        );
        self.scan_for_free_cell(sample_bound)
            .or_else(|| self.scan_for_free_cell(self.state.board_cells))
    }

    fn scan_for_free_cell(&self, bound: i32) -> Option<Position> {
        (0..bound)
            .flat_map(|y| (0..bound).map(move |x| Position::new(x, y)))
            .find(|pos| !self.state.is_occupied_by_snake(*pos))
    }

    /// Put the food on a chosen cell. Refused for cells off the board or
    /// under the snake.
    pub fn place_food(&mut self, cell: Position) -> bool {
        if !self.state.is_in_bounds(cell) || self.state.is_occupied_by_snake(cell) {
            return false;
        }
        self.state.food = cell;
        true
    }

    /// Shrink the tick interval when the score hits a milestone
    fn ramp_speed(&mut self) -> bool {
        let config = &self.config;
        let state = &mut self.state;
        if state.score % config.speed_milestone != 0 || state.speed_ms <= config.min_speed_ms {
            return false;
        }

        state.speed_ms = state
            .speed_ms
            .saturating_sub(config.speed_step_ms)
            .max(config.min_speed_ms);
        self.schedule_revision += 1;
        debug!(speed_ms = state.speed_ms, score = state.score, "speed increased");
        true
    }

    /// Check whether the current head position ends the game
    fn check_collision(&self) -> Option<GameOverReason> {
        let head = self.state.snake.head();

        if !self.state.is_in_bounds(head) {
            return Some(GameOverReason::Wall);
        }

        if self.state.snake.collides_with_body(head) {
            return Some(GameOverReason::SelfCollision);
        }

        None
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.state.game_over_reason = Some(reason);
        self.transition(Phase::GameOver);
        info!(
            ?reason,
            score = self.state.score,
            length = self.state.snake.len(),
            "game over"
        );
    }

    fn transition(&mut self, phase: Phase) {
        debug!(from = ?self.state.phase, to = ?phase, "phase change");
        self.state.phase = phase;
        self.schedule_revision += 1;
    }

    /// Canonical starting snake; food is placed separately
    fn fresh_state(config: &GameConfig) -> GameState {
        let snake = Snake::new(
            config.start_head,
            config.start_direction,
            config.initial_snake_length,
        );
        GameState::new(
            snake,
            Position::new(0, 0),
            config.board_cells(),
            config.base_speed_ms,
        )
    }

    fn place_initial_food(&mut self) {
        // A three-cell snake can never cover the board
        if let Some(food) = self.generate_food() {
            self.state.food = food;
        }
    }
}
