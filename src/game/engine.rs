use super::{
    action::Direction,
    config::GameConfig,
    food::place_food,
    grid::{ConfigError, Grid},
    speed::SpeedSettings,
    state::{GameOverReason, GameState, Position, Snake},
};
use rand::Rng;
use rand::rngs::ThreadRng;

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the head landed on food this tick
    pub ate_food: bool,
    /// Whether this tick raised the best score
    pub new_best: bool,
    /// New tick interval in milliseconds, if eating changed it
    pub speed_changed: Option<u64>,
    /// Set when the run ended on this tick
    pub game_over: Option<GameOverReason>,
}

impl StepResult {
    fn moved() -> Self {
        Self {
            ate_food: false,
            new_best: false,
            speed_changed: None,
            game_over: None,
        }
    }

    fn ended(reason: GameOverReason) -> Self {
        Self {
            game_over: Some(reason),
            ..Self::moved()
        }
    }

    pub fn terminated(&self) -> bool {
        self.game_over.is_some()
    }
}

/// Movement, collision and scoring rules
pub struct GameEngine<R = ThreadRng> {
    grid: Grid,
    speed: SpeedSettings,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine, failing fast on a bad configuration
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: &GameConfig, rng: R) -> Result<Self, ConfigError> {
        let grid = config.validate()?;
        Ok(Self {
            grid,
            speed: config.speed,
            rng,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn speed(&self) -> &SpeedSettings {
        &self.speed
    }

    /// A fresh run: one cell at the board center heading right, score 0,
    /// initial speed, food placed
    pub fn reset(&mut self, best_score: u32) -> GameState {
        let snake = Snake::new(self.grid.center(), Direction::Right);
        let food = place_food(&mut self.rng, &self.grid, &snake);
        GameState::new(self.grid, snake, food, best_score, self.speed.speed_init)
    }

    /// Relocate the food away from the snake
    pub fn place_food(&mut self, state: &mut GameState) {
        state.food = place_food(&mut self.rng, &self.grid, &state.snake);
    }

    /// Execute one tick
    ///
    /// Wall and body checks run before the food check, so a fatal move never
    /// scores. A finished state is left untouched.
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if let Some(reason) = state.game_over {
            return StepResult::ended(reason);
        }

        let new_head = state.snake.commit_direction();

        if let Some(reason) = self.check_collision(state, new_head) {
            state.game_over = Some(reason);
            state.ticks += 1;
            return StepResult::ended(reason);
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance(new_head, ate_food);
        state.ticks += 1;

        if !ate_food {
            return StepResult::moved();
        }

        let mut result = StepResult {
            ate_food: true,
            ..StepResult::moved()
        };

        state.score += 1;
        if state.score > state.best_score {
            state.best_score = state.score;
            result.new_best = true;
        }

        // Placed after the head moves in so food never lands under it
        self.place_food(state);
        if state.food.is_none() {
            state.game_over = Some(GameOverReason::BoardFull);
            result.game_over = state.game_over;
            return result;
        }

        let interval = self.speed.interval_ms(state.score);
        if interval != state.speed_ms {
            state.speed_ms = interval;
            result.speed_changed = Some(interval);
        }

        result
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<GameOverReason> {
        if !state.is_in_bounds(pos) {
            return Some(GameOverReason::Wall);
        }

        // The tail still counts: it has not moved out yet
        if state.is_occupied_by_snake(pos) {
            return Some(GameOverReason::SelfCollision);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine(config: &GameConfig) -> GameEngine<StdRng> {
        GameEngine::with_rng(config, StdRng::seed_from_u64(3)).unwrap()
    }

    fn state_with(engine: &GameEngine<StdRng>, body: Vec<Position>, dir: Direction, food: Position) -> GameState {
        let snake = Snake::from_segments(body, dir).unwrap();
        GameState::new(*engine.grid(), snake, Some(food), 0, engine.speed().speed_init)
    }

    #[test]
    fn test_reset() {
        let mut engine = engine(&GameConfig::default());
        let state = engine.reset(7);

        assert!(state.is_alive());
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 7);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.speed_ms, 120);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert_eq!(state.snake.direction(), Direction::Right);
        let food = state.food.unwrap();
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine(&GameConfig::small());
        let mut state = state_with(
            &engine,
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            Position::new(0, 0),
        );

        let result = engine.step(&mut state);

        assert!(!result.terminated());
        assert!(!result.ate_food);
        assert_eq!(state.ticks, 1);
        assert_eq!(state.snake.segments(), &[Position::new(6, 5), Position::new(5, 5)]);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine(&GameConfig::small());
        let mut state = state_with(
            &engine,
            vec![Position::new(5, 5)],
            Direction::Right,
            Position::new(6, 5),
        );

        let result = engine.step(&mut state);

        assert!(result.ate_food);
        assert!(result.new_best);
        assert_eq!(state.score, 1);
        assert_eq!(state.best_score, 1);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.snake.head(), Position::new(6, 5));
        let food = state.food.unwrap();
        assert!(!state.snake.occupies(food));
        assert_eq!(result.speed_changed, None);
    }

    #[test]
    fn test_best_score_not_lowered() {
        let mut engine = engine(&GameConfig::small());
        let mut state = state_with(
            &engine,
            vec![Position::new(5, 5)],
            Direction::Right,
            Position::new(6, 5),
        );
        state.best_score = 10;

        let result = engine.step(&mut state);
        assert!(result.ate_food);
        assert!(!result.new_best);
        assert_eq!(state.best_score, 10);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine(&GameConfig::small());
        let mut state = state_with(
            &engine,
            vec![Position::new(0, 5)],
            Direction::Left,
            Position::new(5, 5),
        );

        let result = engine.step(&mut state);

        assert!(result.terminated());
        assert!(!state.is_alive());
        assert_eq!(result.game_over, Some(GameOverReason::Wall));
        assert_eq!(state.snake.head(), Position::new(0, 5));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine(&GameConfig::small());
        // Head at (5,5) heading up into its own body at (5,4)
        let mut state = state_with(
            &engine,
            vec![
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 4),
                Position::new(5, 4),
                Position::new(4, 4),
            ],
            Direction::Left,
            Position::new(8, 8),
        );

        state.snake.stage_direction(Direction::Up);
        let result = engine.step(&mut state);

        assert!(result.terminated());
        assert_eq!(result.game_over, Some(GameOverReason::SelfCollision));
    }

    #[test]
    fn test_walls_checked_before_food() {
        let mut engine = engine(&GameConfig::small());
        let mut state = state_with(
            &engine,
            vec![Position::new(9, 0)],
            Direction::Right,
            Position::new(0, 0),
        );
        // Unreachable in play; forces food and wall onto the same cell
        state.food = Some(Position::new(10, 0));

        let result = engine.step(&mut state);
        assert_eq!(result.game_over, Some(GameOverReason::Wall));
        assert!(!result.ate_food);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_moving_into_tail_cell_collides() {
        let mut engine = engine(&GameConfig::small());
        let mut state = state_with(
            &engine,
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(4, 6),
                Position::new(4, 5),
            ],
            Direction::Up,
            Position::new(8, 8),
        );

        state.snake.stage_direction(Direction::Left);
        let result = engine.step(&mut state);
        assert_eq!(result.game_over, Some(GameOverReason::SelfCollision));
    }

    #[test]
    fn test_speed_change_reported() {
        let mut engine = engine(&GameConfig::small());
        let mut state = state_with(
            &engine,
            vec![Position::new(5, 5)],
            Direction::Right,
            Position::new(6, 5),
        );
        state.score = 4;

        let result = engine.step(&mut state);
        assert_eq!(state.score, 5);
        assert_eq!(result.speed_changed, Some(110));
        assert_eq!(state.speed_ms, 110);
    }

    #[test]
    fn test_board_full_ends_run() {
        let config = GameConfig::new(60, 20);
        let mut engine = engine(&config);
        let mut state = state_with(
            &engine,
            vec![Position::new(1, 0), Position::new(0, 0)],
            Direction::Right,
            Position::new(2, 0),
        );

        let result = engine.step(&mut state);
        assert!(result.ate_food);
        assert_eq!(result.game_over, Some(GameOverReason::BoardFull));
        assert!(state.food.is_none());
        assert_eq!(state.snake.len(), 3);
        assert!(GameOverReason::BoardFull.is_win());
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine(&GameConfig::small());
        let mut state = engine.reset(0);
        state.game_over = Some(GameOverReason::Wall);
        let head = state.snake.head();

        let result = engine.step(&mut state);

        assert!(result.terminated());
        assert_eq!(state.ticks, 0);
        assert_eq!(state.snake.head(), head);
    }
}
