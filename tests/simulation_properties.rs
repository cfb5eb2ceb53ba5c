use proptest::prelude::*;
use snake_sim::game::{
    Command, Direction, GameConfig, GameEngine, GameOverReason, GameState, Phase, Position, Snake,
    TickResult,
};

fn running_engine(seed: u64) -> GameEngine {
    let mut engine = GameEngine::with_seed(GameConfig::default(), seed);
    assert!(engine.start());
    engine
}

fn running_with(snake: Snake) -> GameEngine {
    let config = GameConfig::default();
    let mut state = GameState::new(
        snake,
        Position::new(0, 0),
        config.board_cells(),
        config.base_speed_ms,
    );
    state.phase = Phase::Running;
    GameEngine::from_state(config, state, 99)
}

/// Put food right in front of the head and tick into it
fn eat_once(engine: &mut GameEngine) {
    let snake = &engine.state().snake;
    let ahead = snake.head().moved_in_direction(snake.direction);
    assert!(engine.place_food(ahead));
    assert!(engine.tick().ate_food);
}

#[test]
fn reset_restores_canonical_snake() {
    let mut engine = running_engine(1);
    eat_once(&mut engine);
    engine.set_direction(Direction::Down);
    engine.tick();

    engine.reset();

    let state = engine.state();
    assert_eq!(state.phase, Phase::NotStarted);
    assert_eq!(state.score, 0);
    assert_eq!(state.speed_ms, 150);
    assert_eq!(state.snake.len(), 3);
    assert_eq!(
        state.snake.body,
        vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
    );
    assert_eq!(state.snake.direction, Direction::Right);
    assert!(!state.is_occupied_by_snake(state.food));
}

#[test]
fn reversal_does_not_turn_snake_into_its_neck() {
    for (heading, reverse) in [
        (Direction::Right, Direction::Left),
        (Direction::Down, Direction::Up),
    ] {
        let mut engine = running_with(Snake::new(Position::new(10, 10), heading, 3));
        let neck = engine.state().snake.body[1];

        assert!(!engine.apply(Command::SetDirection(reverse)));
        engine.tick();

        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.state().snake.direction, heading);
        assert_ne!(engine.state().snake.head(), neck);
    }
}

#[test]
fn wall_ends_game() {
    let cells = GameConfig::default().board_cells();
    for y in [0, 7, cells - 1] {
        let mut engine = running_with(Snake::new(Position::new(cells - 1, y), Direction::Right, 3));

        let result = engine.tick();

        assert_eq!(result.game_over, Some(GameOverReason::Wall));
        assert_eq!(engine.phase(), Phase::GameOver);
    }
}

#[test]
fn top_wall_ends_game() {
    let mut engine = running_with(Snake::new(Position::new(4, 0), Direction::Up, 3));
    engine.tick();
    assert_eq!(engine.state().game_over_reason, Some(GameOverReason::Wall));
}

#[test]
fn curling_into_body_ends_game() {
    // Long snake walking a tight clockwise square: right, down, left, up
    let mut engine = running_with(Snake::new(Position::new(8, 5), Direction::Right, 6));

    engine.tick();
    assert!(engine.set_direction(Direction::Down));
    engine.tick();
    assert!(engine.set_direction(Direction::Left));
    engine.tick();
    assert!(engine.set_direction(Direction::Up));
    let result = engine.tick();

    assert_eq!(result.game_over, Some(GameOverReason::SelfCollision));
    assert_eq!(engine.phase(), Phase::GameOver);
}

#[test]
fn game_over_freezes_score_and_speed() {
    let mut engine = running_engine(4);
    for _ in 0..5 {
        eat_once(&mut engine);
    }
    let score = engine.state().score;
    let speed = engine.state().speed_ms;

    // Head is now at (10,5); turn up and run into the top wall
    engine.set_direction(Direction::Up);
    while engine.phase() == Phase::Running {
        engine.tick();
    }

    assert_eq!(engine.state().game_over_reason, Some(GameOverReason::Wall));
    assert_eq!(engine.state().score, score);
    assert_eq!(engine.state().speed_ms, speed);
    assert_eq!(engine.tick(), TickResult::default());
}

#[test]
fn food_never_spawns_on_snake() {
    let body: Vec<Position> = (0..15)
        .map(|x| Position::new(x, 3))
        .chain((4..15).map(|y| Position::new(14, y)))
        .collect();
    let snake = Snake::from_segments(body.into_iter().rev().collect(), Direction::Down).unwrap();
    let mut engine = running_with(snake);

    for _ in 0..1000 {
        let food = engine.generate_food().expect("board has room");
        assert!(!engine.state().is_occupied_by_snake(food));
        assert!(food.x < 19 && food.y < 19);
    }
}

#[test]
fn speed_ramps_once_per_fifty_points() {
    let mut engine = running_engine(8);
    let base = engine.state().speed_ms;

    for _ in 0..4 {
        eat_once(&mut engine);
        assert_eq!(engine.state().speed_ms, base);
    }

    eat_once(&mut engine);
    assert_eq!(engine.state().score, 50);
    assert_eq!(engine.state().speed_ms, base - 10);

    for _ in 0..4 {
        eat_once(&mut engine);
        assert_eq!(engine.state().speed_ms, base - 10);
    }

    eat_once(&mut engine);
    assert_eq!(engine.state().score, 100);
    assert_eq!(engine.state().speed_ms, base - 20);
}

#[test]
fn speed_never_drops_below_floor() {
    let mut engine = running_with(Snake::new(Position::new(2, 1), Direction::Right, 3));

    // Zig-zag across the board eating the cell ahead every tick
    for _ in 0..60 {
        let state = engine.state();
        let head = state.snake.head();
        let heading = state.pending_direction.unwrap_or(state.snake.direction);
        let ahead = head.moved_in_direction(heading);
        if !state.is_in_bounds(ahead) {
            let turn = Direction::Down;
            engine.set_direction(turn);
            let down = head.moved_in_direction(turn);
            engine.place_food(down);
            engine.tick();
            let next = if down.x == 0 { Direction::Right } else { Direction::Left };
            engine.set_direction(next);
            continue;
        }
        engine.place_food(ahead);
        engine.tick();
        assert_eq!(engine.phase(), Phase::Running);
    }

    assert!(engine.state().score >= 500);
    assert_eq!(engine.state().speed_ms, 50);
}

#[test]
fn double_pause_toggle_returns_to_running() {
    let mut engine = running_engine(6);
    eat_once(&mut engine);
    let score = engine.state().score;
    let speed = engine.state().speed_ms;

    assert!(engine.apply(Command::TogglePause));
    assert_eq!(engine.phase(), Phase::Paused);
    assert!(engine.apply(Command::TogglePause));

    assert_eq!(engine.phase(), Phase::Running);
    assert_eq!(engine.state().score, score);
    assert_eq!(engine.state().speed_ms, speed);
}

#[test]
fn snapshot_serializes_for_renderers() {
    let engine = GameEngine::with_seed(GameConfig::default(), 12);
    let json = serde_json::to_value(engine.snapshot()).unwrap();

    assert_eq!(json["phase"], "NotStarted");
    assert_eq!(json["score"], 0);
    assert_eq!(json["speed_ms"], 150);
    assert_eq!(json["snake"][0]["x"], 5);
    assert_eq!(json["snake"].as_array().unwrap().len(), 3);
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn each_tick_either_grows_or_moves(seed in any::<u64>(), turns in prop::collection::vec(prop::option::of(direction()), 1..200)) {
        let mut engine = running_engine(seed);

        for turn in turns {
            if engine.phase() != Phase::Running {
                break;
            }
            if let Some(direction) = turn {
                engine.set_direction(direction);
            }

            let len = engine.state().snake.len();
            let score = engine.state().score;
            let result = engine.tick();

            let grew = engine.state().snake.len() == len + 1 && engine.state().score == score + 10;
            let moved = engine.state().snake.len() == len && engine.state().score == score;
            prop_assert!(grew != moved);
            prop_assert_eq!(grew, result.ate_food);
            prop_assert!(engine.state().snake.is_contiguous());

            if engine.phase() == Phase::Running {
                let state = engine.state();
                prop_assert!(state.snake.body.iter().all(|cell| state.is_in_bounds(*cell)));
                prop_assert!(!state.is_occupied_by_snake(state.food));
                prop_assert_eq!(state.score % 10, 0);
            }
        }
    }

    #[test]
    fn generated_food_avoids_snake(seed in any::<u64>()) {
        let mut engine = GameEngine::with_seed(GameConfig::default(), seed);
        for _ in 0..100 {
            let food = engine.generate_food().unwrap();
            prop_assert!(!engine.state().is_occupied_by_snake(food));
        }
    }
}
