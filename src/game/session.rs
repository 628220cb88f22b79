//! The game session: one owned object holding every piece of mutable game
//! state, the tick scheduler and the best-score store.
//!
//! All transitions go through `&mut GameSession`, so a tick always runs to
//! completion before the next input is applied. Input only ever stages a
//! direction or invokes a [`Control`].

use rand::Rng;
use rand::rngs::ThreadRng;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{
    action::Direction,
    config::GameConfig,
    engine::{GameEngine, StepResult},
    grid::ConfigError,
    state::{GameOverReason, GameState},
};
use crate::scheduler::Scheduler;
use crate::store::ScoreStore;

/// Whether ticks are being delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// What the player sees, derived from the run state and the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Fresh board, not started yet
    Ready,
    Running,
    Paused,
    GameOver(GameOverReason),
}

/// Lifecycle actions shared by keys and the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Pause,
    /// Pause if running, otherwise start
    TogglePause,
    Restart,
    /// Restart, but only while stopped
    Confirm,
}

pub struct GameSession<S, T, R = ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
    scheduler: S,
    store: T,
    best_score_key: String,
    awaiting_restart_confirmation: bool,
}

impl<S: Scheduler, T: ScoreStore> GameSession<S, T, ThreadRng> {
    pub fn new(config: &GameConfig, scheduler: S, store: T) -> Result<Self, ConfigError> {
        Self::with_rng(config, scheduler, store, rand::thread_rng())
    }
}

impl<S: Scheduler, T: ScoreStore, R: Rng> GameSession<S, T, R> {
    /// Build a stopped session; the best score is read from the store once here
    pub fn with_rng(
        config: &GameConfig,
        scheduler: S,
        store: T,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let mut engine = GameEngine::with_rng(config, rng)?;
        let best_score = store.get(&config.best_score_key).unwrap_or(0);
        let state = engine.reset(best_score);
        Ok(Self::assemble(config, engine, state, scheduler, store))
    }

    /// Build a stopped session around an existing position
    ///
    /// The state must be on the configured board. Its speed is recomputed
    /// from its score, and its best score is raised to the stored one.
    pub fn with_state(
        config: &GameConfig,
        scheduler: S,
        store: T,
        rng: R,
        mut state: GameState,
    ) -> Result<Self, ConfigError> {
        let engine = GameEngine::with_rng(config, rng)?;
        if state.grid != *engine.grid() {
            return Err(ConfigError::StateGridMismatch {
                cols: state.grid.cols(),
                rows: state.grid.rows(),
            });
        }

        let stored = store.get(&config.best_score_key).unwrap_or(0);
        state.best_score = state.best_score.max(stored).max(state.score);
        state.speed_ms = engine.speed().interval_ms(state.score);
        Ok(Self::assemble(config, engine, state, scheduler, store))
    }

    fn assemble(
        config: &GameConfig,
        engine: GameEngine<R>,
        state: GameState,
        scheduler: S,
        store: T,
    ) -> Self {
        info!(
            cols = state.grid.cols(),
            rows = state.grid.rows(),
            best_score = state.best_score,
            "Session created"
        );

        Self {
            awaiting_restart_confirmation: state.game_over.is_some(),
            engine,
            state,
            scheduler,
            store,
            best_score_key: config.best_score_key.clone(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    pub fn run_state(&self) -> RunState {
        if self.scheduler.is_running() {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }

    pub fn is_awaiting_restart_confirmation(&self) -> bool {
        self.awaiting_restart_confirmation
    }

    pub fn status(&self) -> Status {
        if let Some(reason) = self.state.game_over {
            return Status::GameOver(reason);
        }
        match self.run_state() {
            RunState::Running => Status::Running,
            RunState::Stopped if self.state.ticks == 0 => Status::Ready,
            RunState::Stopped => Status::Paused,
        }
    }

    /// Tick interval for the current score
    fn period(&self) -> Duration {
        self.engine.speed().interval(self.state.score)
    }

    /// Begin ticking at the current speed
    ///
    /// A finished run cannot be resumed, so starting one restarts instead.
    pub fn start(&mut self) {
        if self.scheduler.is_running() {
            return;
        }
        if !self.state.is_alive() {
            self.restart();
            return;
        }
        self.scheduler.start(self.period());
        info!(speed_ms = self.state.speed_ms, "Started");
    }

    pub fn pause(&mut self) {
        if !self.scheduler.is_running() {
            return;
        }
        self.scheduler.stop();
        info!(score = self.state.score, "Paused");
    }

    pub fn toggle_pause(&mut self) {
        match self.run_state() {
            RunState::Running => self.pause(),
            RunState::Stopped => self.start(),
        }
    }

    /// Fresh board, then run
    pub fn restart(&mut self) {
        self.scheduler.stop();
        self.state = self.engine.reset(self.state.best_score);
        self.awaiting_restart_confirmation = false;
        self.scheduler.start(self.period());
        info!(best_score = self.state.best_score, "Restarted");
    }

    /// Restart if stopped; ignored while running
    pub fn confirm(&mut self) {
        if self.scheduler.is_running() {
            return;
        }
        self.restart();
    }

    pub fn control(&mut self, control: Control) {
        match control {
            Control::Start => self.start(),
            Control::Pause => self.pause(),
            Control::TogglePause => self.toggle_pause(),
            Control::Restart => self.restart(),
            Control::Confirm => self.confirm(),
        }
    }

    /// Stage a turn for the next tick; false if it would reverse the snake
    pub fn stage_direction(&mut self, direction: Direction) -> bool {
        self.state.snake.stage_direction(direction)
    }

    /// Run the movement engine once
    pub fn tick(&mut self) -> StepResult {
        let result = self.engine.step(&mut self.state);

        if result.new_best {
            self.persist_best_score();
        }

        if let Some(speed_ms) = result.speed_changed {
            debug!(score = self.state.score, speed_ms, "Speed changed");
            if self.scheduler.is_running() {
                self.scheduler.reschedule(self.period());
            }
        }

        if result.ate_food {
            debug!(score = self.state.score, food = ?self.state.food, "Food eaten");
        }

        if let Some(reason) = result.game_over {
            // A tick on an already finished run reports the reason again
            if !self.awaiting_restart_confirmation {
                self.game_over(reason);
            }
        }

        result
    }

    fn game_over(&mut self, reason: GameOverReason) {
        self.scheduler.stop();
        self.awaiting_restart_confirmation = true;
        info!(
            ?reason,
            score = self.state.score,
            best_score = self.state.best_score,
            length = self.state.snake.len(),
            "Game over"
        );
    }

    fn persist_best_score(&mut self) {
        let best = self.state.best_score;
        if let Err(err) = self.store.set(&self.best_score_key, best) {
            warn!(error = %err, best, "Failed to persist best score");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Grid, Position, Snake};
    use crate::scheduler::{ManualScheduler, SchedulerEvent};
    use crate::store::{MemoryStore, StoreError};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    type TestSession = GameSession<ManualScheduler, MemoryStore, StdRng>;

    fn session_with(store: MemoryStore) -> TestSession {
        GameSession::with_rng(
            &GameConfig::default(),
            ManualScheduler::new(),
            store,
            StdRng::seed_from_u64(11),
        )
        .unwrap()
    }

    fn session() -> TestSession {
        session_with(MemoryStore::new())
    }

    /// Default board, snake on the center heading right, food in the corner
    fn fresh_state() -> GameState {
        let grid = GameConfig::default().validate().unwrap();
        let snake = Snake::new(grid.center(), Direction::Right);
        GameState::new(grid, snake, Some(Position::new(0, 0)), 0, 120)
    }

    /// Food directly ahead of the starting head
    fn food_ahead() -> GameState {
        GameState {
            food: Some(Position::new(11, 10)),
            ..fresh_state()
        }
    }

    fn session_from<T: ScoreStore>(
        state: GameState,
        store: T,
    ) -> GameSession<ManualScheduler, T, StdRng> {
        GameSession::with_state(
            &GameConfig::default(),
            ManualScheduler::new(),
            store,
            StdRng::seed_from_u64(11),
            state,
        )
        .unwrap()
    }

    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn get(&self, _key: &str) -> Option<u32> {
            None
        }

        fn set(&mut self, key: &str, _value: u32) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: key.into(),
                source: std::io::Error::other("read-only"),
            })
        }
    }

    #[test]
    fn test_starts_stopped_and_ready() {
        let session = session();
        assert_eq!(session.run_state(), RunState::Stopped);
        assert_eq!(session.status(), Status::Ready);
        assert!(!session.is_awaiting_restart_confirmation());
    }

    #[test]
    fn test_best_score_read_from_store() {
        let session = session_with(MemoryStore::with_value("snake_best", 17));
        assert_eq!(session.state().best_score, 17);
    }

    #[test]
    fn test_with_state_normalizes_derived_fields() {
        let state = GameState {
            score: 12,
            best_score: 3,
            speed_ms: 999,
            ..fresh_state()
        };
        let session = session_from(state, MemoryStore::with_value("snake_best", 8));

        assert_eq!(session.state().score, 12);
        assert_eq!(session.state().best_score, 12);
        assert_eq!(session.state().speed_ms, 100);
        assert_eq!(session.run_state(), RunState::Stopped);
    }

    #[test]
    fn test_with_state_rejects_other_board() {
        let grid = Grid::new(200, 200, 20).unwrap();
        let state = GameState::new(grid, Snake::new(grid.center(), Direction::Up), None, 0, 120);

        let result = GameSession::with_state(
            &GameConfig::default(),
            ManualScheduler::new(),
            MemoryStore::new(),
            StdRng::seed_from_u64(0),
            state,
        );
        assert!(matches!(
            result,
            Err(ConfigError::StateGridMismatch { cols: 10, rows: 10 })
        ));
    }

    #[test]
    fn test_start_pause_toggle() {
        let mut session = session();

        session.start();
        session.start();
        assert_eq!(session.run_state(), RunState::Running);
        assert_eq!(session.scheduler().period(), Some(Duration::from_millis(120)));

        session.toggle_pause();
        assert_eq!(session.run_state(), RunState::Stopped);
        session.pause();

        session.control(Control::TogglePause);
        assert_eq!(session.run_state(), RunState::Running);
        assert_eq!(
            session.scheduler().events(),
            &[
                SchedulerEvent::Started(Duration::from_millis(120)),
                SchedulerEvent::Stopped,
                SchedulerEvent::Started(Duration::from_millis(120)),
            ]
        );
    }

    #[test]
    fn test_paused_status_after_ticks() {
        let mut session = session_from(fresh_state(), MemoryStore::new());
        session.start();
        session.tick();
        session.pause();
        assert_eq!(session.status(), Status::Paused);
    }

    #[test]
    fn test_game_over_stops_and_awaits_confirmation() {
        let mut session = session_from(fresh_state(), MemoryStore::new());
        session.start();

        // Ten cells to the right wall from the center
        for _ in 0..9 {
            assert!(!session.tick().terminated());
        }
        let result = session.tick();

        assert_eq!(result.game_over, Some(GameOverReason::Wall));
        assert_eq!(session.run_state(), RunState::Stopped);
        assert!(session.is_awaiting_restart_confirmation());
        assert_eq!(session.status(), Status::GameOver(GameOverReason::Wall));

        session.confirm();
        assert!(!session.is_awaiting_restart_confirmation());
        assert_eq!(session.run_state(), RunState::Running);
        assert!(session.state().is_alive());
        assert_eq!(session.state().snake.head(), Position::new(10, 10));
    }

    #[test]
    fn test_confirm_ignored_while_running() {
        let state = GameState {
            score: 3,
            ..fresh_state()
        };
        let mut session = session_from(state, MemoryStore::new());
        session.start();
        session.confirm();
        assert_eq!(session.state().score, 3);
    }

    #[test]
    fn test_start_after_game_over_restarts() {
        let state = GameState {
            game_over: Some(GameOverReason::SelfCollision),
            ..fresh_state()
        };
        let mut session = session_from(state, MemoryStore::new());
        assert!(session.is_awaiting_restart_confirmation());

        session.start();
        assert!(session.state().is_alive());
        assert_eq!(session.run_state(), RunState::Running);
    }

    #[test]
    fn test_speed_change_reschedules_only_when_running() {
        let state = GameState {
            score: 4,
            ..food_ahead()
        };
        let mut session = session_from(state, MemoryStore::new());

        // Stopped: interval updates silently
        session.tick();
        assert_eq!(session.state().speed_ms, 110);
        assert!(session.scheduler().events().is_empty());

        session.start();
        assert_eq!(session.scheduler().period(), Some(Duration::from_millis(110)));
    }

    #[test]
    fn test_new_best_persisted() {
        let mut session = session_from(food_ahead(), MemoryStore::with_value("snake_best", 0));
        session.start();
        session.tick();

        assert_eq!(session.state().best_score, 1);
        assert_eq!(session.store().get("snake_best"), Some(1));
    }

    #[test]
    fn test_store_failure_is_not_fatal() {
        let mut session = session_from(food_ahead(), FailingStore);
        session.start();

        let result = session.tick();
        assert!(result.new_best);
        assert_eq!(session.state().best_score, 1);
        assert_eq!(session.run_state(), RunState::Running);
    }

    #[test]
    fn test_restart_resets_run_but_keeps_best() {
        let mut session = session_from(food_ahead(), MemoryStore::new());
        session.start();
        session.tick();
        session.stage_direction(Direction::Down);

        session.control(Control::Restart);
        let state = session.state();
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 1);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.pending_direction(), Direction::Right);
        assert_eq!(state.speed_ms, 120);
    }
}
