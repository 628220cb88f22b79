use super::action::Direction;
use super::grid::Grid;

/// A cell on the game grid, addressed by (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
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
}

/// The snake: occupied cells head first, plus the committed and staged headings
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
    /// Direction applied on the last tick
    direction: Direction,
    /// Direction requested by input, applied on the next tick
    pending_direction: Direction,
}

impl Snake {
    /// A one-cell snake heading in `direction`
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
            pending_direction: direction,
        }
    }

    /// Build a snake from explicit segments, head first
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            direction,
            pending_direction: direction,
        })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Check if any segment, head included, occupies `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Stage a turn for the next tick
    ///
    /// The request is checked against the committed direction, so several
    /// presses inside one tick can never fold into a reversal. Returns false
    /// when the turn was rejected.
    pub fn stage_direction(&mut self, requested: Direction) -> bool {
        if self.direction.is_opposite(requested) {
            return false;
        }
        self.pending_direction = requested;
        true
    }

    /// Promote the staged direction and return the cell the head moves to
    pub fn commit_direction(&mut self) -> Position {
        self.direction = self.pending_direction;
        self.head().moved_in_direction(self.direction)
    }

    /// Prepend `new_head`, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        if !grow {
            self.body.pop();
        }
        self.body.insert(0, new_head);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a constructed snake)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake fills every cell; there is nowhere left to put food
    BoardFull,
}

impl GameOverReason {
    pub fn is_win(&self) -> bool {
        matches!(self, GameOverReason::BoardFull)
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    /// Absent only once the board is full
    pub food: Option<Position>,
    pub score: u32,
    pub best_score: u32,
    /// Current tick interval in milliseconds
    pub speed_ms: u64,
    pub ticks: u64,
    pub game_over: Option<GameOverReason>,
}

impl GameState {
    /// Create a fresh state for a new run
    pub fn new(
        grid: Grid,
        snake: Snake,
        food: Option<Position>,
        best_score: u32,
        speed_ms: u64,
    ) -> Self {
        Self {
            grid,
            snake,
            food,
            score: 0,
            best_score,
            speed_ms,
            ticks: 0,
            game_over: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.game_over.is_none()
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.grid.contains(pos)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}
